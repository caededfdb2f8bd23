use jobgrid_argv::{Coercion, UnparsedArguments};
use serde_json::json;

#[test]
fn reads_consume_their_entry() {
    let mut args = UnparsedArguments::from_argv(&["a=1", "b=2"]).expect("split");
    assert_eq!(args.len(), 2);
    assert_eq!(args.read_int("a").expect("a"), 1);
    assert_eq!(args.len(), 1);

    let err = args.read_int("a").expect_err("consumed");
    assert_eq!(err.info().code, "arg-missing");

    assert_eq!(args.read_int("b").expect("b"), 2);
    assert!(args.is_empty());
}

#[test]
fn typed_reads_parse_their_target_type() {
    let tokens = ["s=hello", "i=-3", "u=7", "f=0.5", "b=True"];
    let mut args = UnparsedArguments::from_argv(&tokens).expect("split");
    assert_eq!(args.read_str("s").expect("str"), "hello");
    assert_eq!(args.read_int("i").expect("int"), -3);
    assert_eq!(args.read_uint("u").expect("uint"), 7);
    assert_eq!(args.read_float("f").expect("float"), 0.5);
    assert!(args.read_bool("b").expect("bool"));
    args.ensure_consumed().expect("all consumed");
}

#[test]
fn typed_reads_reject_mismatched_text() {
    let mut args = UnparsedArguments::from_argv(&["u=-1", "f=x", "b=yes"]).expect("split");
    assert_eq!(args.read_uint("u").expect_err("negative").info().code, "coerce-parse");
    assert_eq!(args.read_float("f").expect_err("not a float").info().code, "coerce-parse");
    assert_eq!(args.read_bool("b").expect_err("not a literal").info().code, "coerce-parse");
}

#[test]
fn read_applies_a_coercion() {
    let mut args = UnparsedArguments::from_argv(&["n=41"]).expect("split");
    assert_eq!(args.read("n", &Coercion::Int).expect("int"), json!(41));
}

#[test]
fn failed_typed_reads_still_consume_the_entry() {
    let mut args = UnparsedArguments::from_argv(&["n=oops"]).expect("split");
    args.read_int("n").expect_err("not an int");
    assert!(args.is_empty());
    args.ensure_consumed().expect("nothing left");
}

#[test]
fn ensure_consumed_lists_leftovers_sorted() {
    let args = UnparsedArguments::from_argv(&["zeta=1", "alpha=2", "mid=3"]).expect("split");
    let err = args.ensure_consumed().expect_err("leftovers");
    assert_eq!(err.info().code, "args-unused");
    assert_eq!(err.info().context.get("params"), Some(&"alpha, mid, zeta".to_string()));
}

#[test]
fn names_are_sorted_and_duplicates_keep_the_last_value() {
    let mut args = UnparsedArguments::from_argv(&["b=1", "a=2", "b=3"]).expect("split");
    let names: Vec<_> = args.names().collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(args.read_int("b").expect("b"), 3);
}

#[test]
fn tokens_split_at_the_first_equals_sign() {
    let mut args = UnparsedArguments::from_argv(&["k=a=b", "empty="]).expect("split");
    assert_eq!(args.read_str("k").expect("k"), "a=b");
    assert_eq!(args.read_str("empty").expect("empty"), "");
}

#[test]
fn tokens_without_equals_cannot_be_split() {
    let err = UnparsedArguments::from_argv(&["a=1", "nope"]).expect_err("no equals");
    assert_eq!(err.info().code, "argv-split");
    assert_eq!(err.info().context.get("token"), Some(&"nope".to_string()));
}
