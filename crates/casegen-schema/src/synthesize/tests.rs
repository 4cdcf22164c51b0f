use super::*;
use crate::resolve::{Capabilities, CapabilityTable};

// ---- helpers -----------------------------------------------------------

fn builtin() -> Synthesizer<BuiltinResolver> {
    Synthesizer::new(BuiltinResolver, SynthesisOptions::default())
}

fn vec_of(element: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::reference("Vec").with_argument("T", element)
}

fn record_param(name: &str, record: &str) -> GenericParamSpec {
    GenericParamSpec::new(name, GenericOwner::Record(record.into()))
}

// ---- synthesis ---------------------------------------------------------

#[test]
fn variable_synthesizes_a_plain_reference_field() {
    let synth = Synthesizer::new(DescriptorResolver, SynthesisOptions::default());
    let sig = FactorySignature::new("Variable")
        .with_parameter("name", TypeDescriptor::reference("String"));

    let def = synth.synthesize(&sig).expect("synthesize");

    assert_eq!(def.name, "Variable");
    assert!(!def.is_generic());
    assert_eq!(def.fields[0].variety.kind(), VarietyKind::PlainReference);
    assert_eq!(def.fields[0].accessor, "name");
    assert_eq!(
        def.equality[0].comparison,
        Comparison::Default { nullable: true }
    );
    assert_eq!(def.rendering.type_name, "Variable");
    assert_eq!(def.rendering.fields, ["name"]);
    assert_eq!(def.rewrite.to_string(), "Variable => Variable(name)");
}

#[test]
fn factory_generics_are_rebound_to_the_record() {
    let sig = FactorySignature::new("wrap").with_generic("P");
    let factory_p = sig.generic_parameters[0].clone();
    let sig = sig.with_parameter("items", TypeDescriptor::array(factory_p.to_descriptor()));

    let def = builtin().synthesize(&sig).expect("synthesize");
    let record_p = record_param("P", "Wrap");

    assert_eq!(def.name, "Wrap");
    assert_eq!(def.generic_parameters, vec![record_p.clone()]);
    assert_eq!(
        def.fields[0].backing_storage_type,
        TypeDescriptor::array(record_p.to_descriptor())
    );
    assert_eq!(
        def.fields[0].variety,
        TypeVariety::TypedCollection(Box::new(record_p.to_descriptor()))
    );
    assert_eq!(
        def.equality[0].comparison,
        Comparison::Sequence {
            element: Box::new(Comparison::Default { nullable: true })
        }
    );
    assert_eq!(def.rewrite.type_arguments, ["P"]);
    assert_eq!(def.constructor[0].ty, def.fields[0].backing_storage_type);
}

#[test]
fn equatability_outranks_collection_shape() {
    let table = CapabilityTable::new().with(
        "Path",
        Capabilities {
            equatable: true,
            ..Capabilities::typed_collection("T")
        },
    );
    let synth = Synthesizer::new(table, SynthesisOptions::default());
    let sig = FactorySignature::new("route").with_parameter(
        "path",
        TypeDescriptor::reference("Path").with_argument("T", TypeDescriptor::reference("Segment")),
    );

    let def = synth.synthesize(&sig).expect("synthesize");

    assert_eq!(def.fields[0].variety.kind(), VarietyKind::ReferenceEquatable);
    assert_eq!(
        def.equality[0].comparison,
        Comparison::Equatable { nullable: true }
    );
}

#[test]
fn nested_collections_compare_by_element_variety() {
    let sig = FactorySignature::new("grid")
        .with_parameter("cells", vec_of(vec_of(TypeDescriptor::value("i32"))));

    let def = builtin().synthesize(&sig).expect("synthesize");

    assert_eq!(
        def.equality[0].comparison,
        Comparison::Sequence {
            element: Box::new(Comparison::Sequence {
                element: Box::new(Comparison::Equatable { nullable: false }),
            }),
        }
    );
}

#[test]
fn hash_plan_follows_declaration_order_and_nullability() {
    let sig = FactorySignature::new("money")
        .with_parameter("amount", TypeDescriptor::value("i64"))
        .with_parameter("currency", TypeDescriptor::reference("String"))
        .with_parameter("rate", TypeDescriptor::optional(TypeDescriptor::value("f64")));

    let def = builtin().synthesize(&sig).expect("synthesize");
    let steps = def
        .hash
        .steps
        .iter()
        .map(|s| (s.field.as_str(), s.contribution))
        .collect::<Vec<_>>();

    assert_eq!(def.hash.seed, HASH_SEED);
    assert_eq!(def.hash.multiplier, HASH_MULTIPLIER);
    assert_eq!(
        steps,
        [
            ("amount", HashContribution::Intrinsic),
            ("currency", HashContribution::Referenced),
            ("rate", HashContribution::Referenced),
        ]
    );
    assert_eq!(
        def.equality[2].comparison,
        Comparison::Optional { equatable: true }
    );
}

#[test]
fn value_constrained_parameter_is_a_plain_value() {
    let t = GenericParamSpec::factory("T", "constant").value_constrained();
    let sig = FactorySignature::new("constant")
        .with_generic_spec(t.clone())
        .with_parameter("value", t.to_descriptor());

    let def = builtin().synthesize(&sig).expect("synthesize");

    assert_eq!(def.fields[0].variety.kind(), VarietyKind::PlainValue);
    assert_eq!(def.hash.steps[0].contribution, HashContribution::Intrinsic);
    assert!(def.generic_parameters[0].constraints.value);
}

#[test]
fn zero_fields_produce_an_empty_record() {
    let def = builtin()
        .synthesize(&FactorySignature::new("unit"))
        .expect("synthesize");

    assert_eq!(def.arity(), 0);
    assert!(def.hash.steps.is_empty());
    assert!(def.rendering.fields.is_empty());
}

#[test]
fn verbatim_naming_keeps_the_factory_name() {
    let options = SynthesisOptions {
        naming: RecordNaming::Verbatim,
        check_reserved: true,
    };
    let synth = Synthesizer::new(BuiltinResolver, options);

    assert_eq!(synth.record_name("make_pair"), "make_pair");
    assert_eq!(builtin().record_name("make_pair"), "MakePair");
}

// ---- failures ----------------------------------------------------------

#[test]
fn undeclared_generic_fails_loudly() {
    let stray = GenericParamSpec::factory("Q", "wrap");
    let sig = FactorySignature::new("wrap")
        .with_generic("P")
        .with_parameter("items", TypeDescriptor::array(stray.to_descriptor()));

    let err = builtin().synthesize(&sig).expect_err("undeclared generic");

    assert!(
        matches!(
            err,
            SynthesisError::Substitute {
                ref field,
                source: SubstituteError::UnknownGenericParameter { .. },
            } if field == "items"
        ),
        "{err}"
    );
}

#[test]
fn invalid_signature_is_rejected_before_classification() {
    let sig = FactorySignature::new("pair")
        .with_parameter("a", TypeDescriptor::value("i32"))
        .with_parameter("a", TypeDescriptor::value("i32"));

    let err = builtin().synthesize(&sig).expect_err("duplicate field");

    assert!(matches!(err, SynthesisError::Validation { .. }), "{err}");
}

#[test]
fn malformed_optional_reports_the_field() {
    let broken = TypeDescriptor::Concrete(ConcreteType::new("Option", TypeKind::OptionalValue));
    let sig = FactorySignature::new("opt").with_parameter("value", broken);

    let err = builtin().synthesize(&sig).expect_err("missing underlying type");

    assert!(matches!(err, SynthesisError::Classify { .. }), "{err}");
    assert!(err.to_string().starts_with("field 'value'"), "{err}");
}

// ---- pre-classified ----------------------------------------------------

#[test]
fn classified_fields_have_their_payloads_rebound() {
    let factory_t = GenericParamSpec::factory("T", "box").equatable();
    let spec = FieldSpecification::new("inner", factory_t.to_descriptor(), 0);
    let fields = [ClassifiedField::new(
        spec,
        TypeVariety::GenericEquatable(factory_t.clone()),
    )];

    let def = builtin()
        .synthesize_classified("box", &fields, &[factory_t])
        .expect("synthesize");
    let record_t = record_param("T", "Box").equatable();

    assert_eq!(def.fields[0].variety, TypeVariety::GenericEquatable(record_t));
    assert_eq!(
        def.equality[0].comparison,
        Comparison::Equatable { nullable: true }
    );
}

#[test]
fn definitions_round_trip_through_json() {
    let sig = FactorySignature::new("wrap").with_generic("P");
    let p = sig.generic_parameters[0].to_descriptor();
    let sig = sig.with_parameter("items", TypeDescriptor::array(p));

    let def = builtin().synthesize(&sig).expect("synthesize");
    let json = serde_json::to_string(&def).expect("serialize");
    let back: RecordTypeDefinition = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(back, def);
}
