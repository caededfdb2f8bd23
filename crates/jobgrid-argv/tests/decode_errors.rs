use jobgrid_argv::{argv_from_job, job_from_argv, Coercion, JobArgvConfig, Typemap};
use jobgrid_core::{CallbackError, Job, JobGridError, JobParams};
use serde_json::{json, Value};

fn noop(params: &JobParams) -> Result<Value, CallbackError> {
    let _ = params;
    Ok(Value::Null)
}

fn decode(argv: &[&str]) -> Result<Job, JobGridError> {
    job_from_argv(argv, noop, &Typemap::new(), &JobArgvConfig::default())
}

#[test]
fn missing_separator_is_fatal() {
    let err = decode(&["--id=2", "--rep=0", "a=42"]).expect_err("no separator");
    assert_eq!(err.info().code, "argv-separator");
}

#[test]
fn unexpected_meta_arguments_are_listed_sorted() {
    let err = decode(&["--id=4", "--rep=5", "--unexpected=x", "--"]).expect_err("extra meta");
    assert_eq!(err.info().code, "meta-unexpected");
    assert_eq!(err.info().context.get("params"), Some(&"--unexpected".to_string()));

    let err = decode(&["--zz=1", "--id=0", "--aa=2", "--rep=0", "--"]).expect_err("extra meta");
    assert_eq!(err.info().context.get("params"), Some(&"--aa, --zz".to_string()));
}

#[test]
fn missing_meta_arguments_are_named() {
    let err = decode(&["--rep=0", "--"]).expect_err("missing id");
    assert_eq!(err.info().code, "arg-missing");
    assert_eq!(err.info().context.get("param"), Some(&"--id".to_string()));

    let err = decode(&["--id=0", "--"]).expect_err("missing rep");
    assert_eq!(err.info().code, "arg-missing");
    assert_eq!(err.info().context.get("param"), Some(&"--rep".to_string()));
}

#[test]
fn non_numeric_ids_are_rejected() {
    let err = decode(&["--id=x", "--rep=0", "--"]).expect_err("id not numeric");
    assert_eq!(err.info().code, "coerce-parse");
    assert_eq!(err.info().context.get("param"), Some(&"--id".to_string()));

    let err = decode(&["--id=1", "--rep=1.5", "--"]).expect_err("rep not integral");
    assert_eq!(err.info().code, "coerce-parse");

    let err = decode(&["--id=-1", "--rep=0", "--"]).expect_err("negative id");
    assert_eq!(err.info().code, "coerce-parse");
}

#[test]
fn meta_token_without_a_value_is_rejected() {
    let err = decode(&["--id", "--rep=0", "--"]).expect_err("bare key");
    assert_eq!(err.info().code, "argv-split");
    assert_eq!(err.info().context.get("token"), Some(&"--id".to_string()));
}

#[test]
fn param_token_without_a_value_is_rejected() {
    let err = decode(&["--id=0", "--rep=0", "--", "oops"]).expect_err("bare param");
    assert_eq!(err.info().code, "argv-split");
    assert_eq!(err.info().context.get("token"), Some(&"oops".to_string()));
}

#[test]
fn coercion_failures_name_the_parameter() {
    let typemap = Typemap::new().with("a", Coercion::Int);
    let argv = ["--id=0", "--rep=0", "--", "a=notanint"];
    let err = job_from_argv(&argv, noop, &typemap, &JobArgvConfig::default())
        .expect_err("bad int");
    assert_eq!(err.info().code, "coerce-parse");
    assert_eq!(err.info().context.get("param"), Some(&"a".to_string()));
    assert_eq!(err.info().context.get("value"), Some(&"notanint".to_string()));
    assert!(err.info().hint.is_some());
}

#[test]
fn strict_bool_coercion_applies_on_the_wire() {
    let typemap = Typemap::new().with("b", Coercion::Bool);
    let argv = ["--id=0", "--rep=0", "--", "b=true"];
    let err = job_from_argv(&argv, noop, &typemap, &JobArgvConfig::default())
        .expect_err("lowercase bool");
    assert_eq!(err.info().code, "coerce-parse");
}

#[test]
fn unencodable_param_names_fail_encoding() {
    for name in ["", "--", "we=ird"] {
        let mut params = JobParams::new();
        params.insert(name.to_string(), json!(1));
        let job = Job::new(0, 0, noop, params);
        let err = argv_from_job(&job, &Typemap::new(), &JobArgvConfig::default())
            .expect_err("bad name");
        assert_eq!(err.info().code, "param-name");
    }
}

#[test]
fn format_failures_surface_during_encoding() {
    let mut params = JobParams::new();
    params.insert("n".to_string(), json!("not a number"));
    let job = Job::new(0, 0, noop, params);
    let typemap = Typemap::new().with("n", Coercion::Int);
    let err = argv_from_job(&job, &typemap, &JobArgvConfig::default()).expect_err("bad value");
    assert_eq!(err.info().code, "coerce-format");
}
