use casegen::{
    ConfigErrorKind, ErrorKind, ErrorOrigin, RuntimeErrorKind, SynthesisErrorKind, prelude::*,
};
use proptest::prelude::*;

// ---- helpers -----------------------------------------------------------

fn wrap() -> FactorySignature {
    let sig = FactorySignature::new("wrap").with_generic("P");
    let p = sig.generic_parameters[0].to_descriptor();

    sig.with_parameter("items", TypeDescriptor::reference("Vec").with_argument("T", p))
}

fn variable() -> FactorySignature {
    FactorySignature::new("variable").with_parameter("name", TypeDescriptor::reference("String"))
}

// ---- definitions -------------------------------------------------------

#[test]
fn wrap_instantiates_per_type_argument() {
    let mut casegen = Casegen::default();
    casegen.define(&wrap()).expect("define");

    let ints = casegen
        .invoke(
            "wrap",
            vec![TypeDescriptor::value("i32")],
            vec![Value::list([1, 2, 3])],
        )
        .expect("ints");
    let texts = casegen
        .invoke(
            "wrap",
            vec![TypeDescriptor::reference("String")],
            vec![Value::list(["a", "b"])],
        )
        .expect("texts");

    assert_eq!(ints.record_type().to_string(), "Wrap<i32>");
    assert_eq!(texts.record_type().to_string(), "Wrap<String>");
    assert_eq!(
        ints.record_type().field_types()[0],
        TypeDescriptor::reference("Vec").with_argument("T", TypeDescriptor::value("i32"))
    );
    assert_eq!(ints.to_string(), "Wrap(items: [1, 2, 3])");

    let again = casegen
        .invoke(
            "wrap",
            vec![TypeDescriptor::value("i32")],
            vec![Value::list([1, 2, 3])],
        )
        .expect("again");
    assert_eq!(ints, again);
    assert_eq!(ints.hash_code(), again.hash_code());
    assert_ne!(ints, texts);
}

#[test]
fn defining_a_record_twice_conflicts() {
    let mut casegen = Casegen::default();
    casegen.define(&variable()).expect("first");

    let err = casegen.define(&variable()).expect_err("second");

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.origin, ErrorOrigin::Build);
}

#[test]
fn define_all_keeps_going_past_failures() {
    let mut casegen = Casegen::default();
    let broken = FactorySignature::new("broken")
        .with_parameter("type", TypeDescriptor::reference("String"));

    let failures = casegen.define_all(&[broken, variable(), wrap(), variable()]);

    assert_eq!(failures.len(), 2, "{failures:?}");
    assert_eq!(failures[0].factory, "broken");
    assert_eq!(failures[1].factory, "variable");
    assert!(casegen.record_type("Variable").is_some());
    assert!(casegen.record_type("Wrap").is_some());
    assert!(casegen.record_type("Broken").is_none());
}

#[test]
fn invalid_signatures_report_synthesis_errors() {
    let casegen = Casegen::default();
    let sig = FactorySignature::new("wrap").with_parameter(
        "items",
        GenericParamSpec::factory("Q", "wrap").to_descriptor(),
    );

    let err = casegen.synthesize(&sig).expect_err("undeclared generic");

    assert_eq!(
        err.kind,
        ErrorKind::Synthesis(SynthesisErrorKind::UnboundGeneric)
    );
    assert!(err.message.contains("'Q'"), "{err}");
}

#[test]
fn type_arguments_for_a_plain_factory_are_rejected() {
    let mut casegen = Casegen::default();
    casegen.define(&variable()).expect("define");

    let err = casegen
        .invoke(
            "variable",
            vec![TypeDescriptor::value("i32")],
            vec![Value::text("x")],
        )
        .expect_err("not generic");

    assert_eq!(err.kind, ErrorKind::Runtime(RuntimeErrorKind::Instantiation));
    assert!(err.message.contains("Variable"), "{err}");
}

#[test]
fn unknown_names_are_not_found() {
    let casegen = Casegen::default();

    let err = casegen.construct("Missing", Vec::new()).expect_err("missing");
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = casegen
        .invoke("missing", Vec::new(), Vec::new())
        .expect_err("missing");
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.origin, ErrorOrigin::Session);
}

// ---- config ------------------------------------------------------------

#[test]
fn verbatim_naming_keeps_the_factory_name() {
    let mut casegen = Casegen::from_toml_str("[record]\nnaming = \"verbatim\"\n").expect("config");

    let ty = casegen.define(&variable()).expect("define");

    assert_eq!(ty.name(), "variable");
    assert!(casegen.record_type("variable").is_some());
}

#[test]
fn declared_types_drive_classification() {
    let mut casegen = Casegen::from_toml_str(
        "[[types]]\nname = \"Money\"\nequatable = true\n",
    )
    .expect("config");
    let sig = FactorySignature::new("price").with_parameter("amount", TypeDescriptor::value("Money"));

    let ty = casegen.define(&sig).expect("define");

    assert_eq!(
        ty.definition().fields[0].variety.kind(),
        VarietyKind::ValueEquatable
    );
}

#[test]
fn bad_config_is_a_config_error() {
    let err = Casegen::from_toml_str("[[types]]\nname = \"\"\n").expect_err("invalid");

    assert_eq!(err.kind, ErrorKind::Config(ConfigErrorKind::Invalid));
    assert_eq!(err.origin, ErrorOrigin::Config);
}

// ---- properties --------------------------------------------------------

proptest! {
    #[test]
    fn equal_variables_hash_alike(name in proptest::option::of(".{0,24}")) {
        let mut casegen = Casegen::default();
        casegen.define(&variable()).expect("define");

        let make = || casegen.invoke("variable", Vec::new(), vec![Value::from(name.clone())]).expect("variable");
        let (a, b) = (make(), make());

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert!(ops::equals(Some(&a), Some(&b)));
    }
}
