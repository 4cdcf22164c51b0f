//! Synthesizes the expression factories from `fixtures/expression.json` and
//! exercises the resulting record types end to end.

use casegen::{ErrorKind, RuntimeErrorKind, prelude::*};
use std::collections::BTreeSet;

const CONFIG: &str = r#"
[[types]]
name = "Decimal"
equatable = true

[[types]]
name = "Guid"
equatable = true
"#;

const NAMES: [Option<&str>; 5] = [
    None,
    Some(""),
    Some(" "),
    Some("oddName"),
    Some("Very long string with a lot of text"),
];

// ---- helpers -----------------------------------------------------------

fn signatures() -> Vec<FactorySignature> {
    serde_json::from_str(include_str!("fixtures/expression.json")).expect("fixture parses")
}

fn session() -> Casegen {
    let mut casegen = Casegen::from_toml_str(CONFIG).expect("config");
    let failures = casegen.define_all(&signatures());
    assert!(failures.is_empty(), "{failures:?}");

    casegen
}

fn variable(casegen: &Casegen, name: Option<&str>) -> Record {
    casegen
        .invoke("variable", Vec::new(), vec![Value::from(name)])
        .expect("variable")
}

// A fresh expression for each call, so equality never rests on sharing.
fn expression(casegen: &Casegen, choice: usize) -> Value {
    match choice {
        0 => Value::Null,
        1 => Value::record(variable(casegen, Some("oddName"))),
        _ => Value::record(
            casegen
                .invoke(
                    "constant",
                    vec![TypeDescriptor::value("DateTime")],
                    vec![Value::Int(1_700_000_000)],
                )
                .expect("constant"),
        ),
    }
}

// ---- synthesis ---------------------------------------------------------

#[test]
fn every_factory_yields_a_record_type() {
    let casegen = session();
    let names = casegen
        .record_types()
        .map(|ty| ty.name().to_string())
        .collect::<BTreeSet<_>>();

    assert_eq!(
        names,
        [
            "BinaryOperator",
            "Constant",
            "Func2",
            "LargeTuple",
            "Money",
            "UnaryOperator",
            "Variable",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    );
}

#[test]
fn field_varieties_follow_declared_capabilities() {
    let casegen = session();
    let kinds = |name: &str| {
        casegen
            .record_type(name)
            .expect("record type")
            .definition()
            .fields
            .iter()
            .map(|f| f.variety.kind())
            .collect::<Vec<_>>()
    };

    assert_eq!(kinds("Variable"), [VarietyKind::ReferenceEquatable]);
    assert_eq!(kinds("Constant"), [VarietyKind::PlainValue]);
    assert_eq!(kinds("Func2"), [VarietyKind::PlainGeneric; 3]);
    assert_eq!(
        kinds("Money"),
        [VarietyKind::ValueEquatable, VarietyKind::ReferenceEquatable]
    );
    assert_eq!(
        kinds("LargeTuple"),
        [
            VarietyKind::ReferenceEquatable,
            VarietyKind::ValueEquatable,
            VarietyKind::ValueEquatable,
            VarietyKind::ValueEquatable,
            VarietyKind::PlainValue,
            VarietyKind::ValueEquatable,
        ]
    );
    assert_eq!(kinds("UnaryOperator")[1], VarietyKind::PlainReference);
}

#[test]
fn rewrites_forward_generics_and_arguments() {
    let casegen = session();
    let rewrite = |name: &str| {
        casegen
            .record_type(name)
            .expect("record type")
            .definition()
            .rewrite
            .to_string()
    };

    assert_eq!(rewrite("Constant"), "constant => Constant<T>(value)");
    assert_eq!(
        rewrite("Func2"),
        "func2 => Func2<TArg1, TArg2, TResult>(arg1, arg2, result)"
    );
    assert_eq!(
        rewrite("BinaryOperator"),
        "binary_operator => BinaryOperator(operator, left_expression, right_expression)"
    );
}

// ---- behavior ----------------------------------------------------------

#[test]
fn variable_names_survive_construction() {
    let casegen = session();

    for name in NAMES {
        let record = variable(&casegen, name);

        assert_eq!(record.get("name"), Some(&Value::from(name)));
        assert_eq!(record, variable(&casegen, name));
    }
}

#[test]
fn money_exposes_its_fields() {
    let casegen = session();
    let money = casegen
        .invoke("money", Vec::new(), vec![Value::Int(100), Value::text("USD")])
        .expect("money");

    assert_eq!(money.get("amount"), Some(&Value::Int(100)));
    assert_eq!(money.get("currency").and_then(Value::as_text), Some("USD"));
    assert_eq!(money.to_string(), "Money(amount: 100, currency: USD)");
}

#[test]
fn operators_compare_structurally() {
    let casegen = session();

    for operator in NAMES {
        for left in 0..3 {
            for right in 0..3 {
                let build = || {
                    casegen
                        .invoke(
                            "binary_operator",
                            Vec::new(),
                            vec![
                                Value::from(operator),
                                expression(&casegen, left),
                                expression(&casegen, right),
                            ],
                        )
                        .expect("binary operator")
                };
                let (a, b) = (build(), build());

                assert!(ops::equals(Some(&a), Some(&b)), "{a} != {b}");
                assert!(!ops::not_equals(Some(&a), Some(&b)));
                assert_eq!(a.hash_code(), b.hash_code());
            }
        }
    }
}

#[test]
fn operators_differ_by_any_field() {
    let casegen = session();
    let unary = |operator: &str, choice: usize| {
        casegen
            .invoke(
                "unary_operator",
                Vec::new(),
                vec![Value::text(operator), expression(&casegen, choice)],
            )
            .expect("unary operator")
    };

    assert_ne!(unary("-", 1), unary("+", 1));
    assert_ne!(unary("-", 1), unary("-", 2));
    assert_ne!(unary("-", 0), unary("-", 1));

    let nested = unary("-", 1);
    assert_eq!(
        nested
            .get("expression")
            .and_then(Value::as_record)
            .map(Record::name),
        Some("Variable")
    );
    assert_eq!(
        unary("-", 1).to_string(),
        "UnaryOperator(operator: -, expression: Variable(name: oddName))"
    );
}

#[test]
fn constant_requires_a_value_type_argument() {
    let casegen = session();

    let constant = casegen
        .invoke(
            "constant",
            vec![TypeDescriptor::value("i32")],
            vec![Value::Int(7)],
        )
        .expect("constant");
    assert_eq!(constant.record_type().to_string(), "Constant<i32>");
    assert_eq!(constant.to_string(), "Constant(value: 7)");

    let err = casegen
        .invoke(
            "constant",
            vec![TypeDescriptor::reference("String")],
            vec![Value::text("x")],
        )
        .expect_err("reference argument");
    assert_eq!(
        err.kind,
        ErrorKind::Runtime(RuntimeErrorKind::ConstraintViolation)
    );
}

#[test]
fn constants_of_different_instantiations_are_unequal() {
    let casegen = session();
    let constant = |ty: &str| {
        casegen
            .invoke("constant", vec![TypeDescriptor::value(ty)], vec![Value::Int(1)])
            .expect("constant")
    };

    assert_eq!(constant("i64"), constant("i64"));
    assert_ne!(constant("i64"), constant("u64"));
}

#[test]
fn func2_binds_three_type_arguments() {
    let casegen = session();
    let record = casegen
        .invoke(
            "func2",
            vec![
                TypeDescriptor::value("i32"),
                TypeDescriptor::reference("String"),
                TypeDescriptor::value("bool"),
            ],
            vec![Value::Int(1), Value::text("x"), Value::Bool(true)],
        )
        .expect("func2");

    assert_eq!(record.record_type().to_string(), "Func2<i32, String, bool>");
    assert_eq!(
        record.record_type().field_types(),
        [
            TypeDescriptor::value("i32"),
            TypeDescriptor::reference("String"),
            TypeDescriptor::value("bool"),
        ]
    );
    assert_eq!(record.to_string(), "Func2(arg1: 1, arg2: x, result: true)");

    let err = casegen
        .construct("Func2", vec![Value::Null, Value::Null, Value::Null])
        .expect_err("open type");
    assert_eq!(err.kind, ErrorKind::Runtime(RuntimeErrorKind::Instantiation));
}

#[test]
fn large_tuple_checks_arity() {
    let casegen = session();
    let values = vec![
        Value::text("a"),
        Value::Int(2),
        Value::Int(300),
        Value::Float(4.5),
        Value::Int(1_700_000_000),
        Value::text("6f1c"),
    ];

    let record = casegen
        .invoke("large_tuple", Vec::new(), values.clone())
        .expect("large tuple");
    assert_eq!(record.values(), values.as_slice());
    assert_eq!(
        record.to_string(),
        "LargeTuple(item1: a, item2: 2, item3: 300, item4: 4.5, item5: 1700000000, item6: 6f1c)"
    );

    let err = casegen
        .invoke("large_tuple", Vec::new(), values[..5].to_vec())
        .expect_err("short");
    assert_eq!(err.kind, ErrorKind::Runtime(RuntimeErrorKind::Arity));
}
