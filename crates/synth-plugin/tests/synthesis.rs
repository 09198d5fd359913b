//! The two-phase pipeline end to end through the host

use synth_host::{
    BodyContext, BodyGenerator, CallableId, CompileError, CompilerConfiguration,
    DeclarationGenerator, ExtensionStorage, FqName, Frontend, GenerationKey, Interpreter,
    LoadError, Name, PluginLoader, RuntimeEvent, SymbolDescriptor, SymbolTable, SynthesisError,
    TypeContext, Value,
};
use synth_plugin::catalog::{FUNCTION_NAME, GREETING};
use synth_plugin::{CatalogEntry, SimplePluginRegistrar};

fn attach(config: &mut CompilerConfiguration) -> Result<ExtensionStorage, LoadError> {
    let loader = PluginLoader::from_manifests(&synth_plugin::services::manifests()?)?;
    let mut storage = ExtensionStorage::new();
    loader.attach(synth_identity::PLUGIN_ID, config, &mut storage)?;
    Ok(storage)
}

#[test]
fn test_out_of_catalog_namespaces() {
    let (declarations, _) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();

    for path in ["bar", "foo.baz", "foo.bar.baz", "synth"] {
        let package = FqName::parse(path);
        assert!(!declarations.has_namespace(&package), "{path}");
        let id = synth_host::ClassId::new(package, "MyClass");
        assert!(declarations.generate_class_like(&id, &mut types).is_none(), "{path}");
    }
}

#[test]
fn test_catalog_is_exactly_one_class() {
    let (declarations, _) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();
    let class_id = CatalogEntry::class_id();

    let symbols = declarations.top_level_symbols();
    assert_eq!(symbols.len(), 1);
    assert!(symbols.contains(&SymbolDescriptor::Class(class_id.clone())));

    let first = declarations.generate_class_like(&class_id, &mut types).unwrap();
    let second = declarations.generate_class_like(&class_id, &mut types).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.origin.key(), Some(declarations.key()));
    assert!(first.span.is_synthetic());
}

#[test]
fn test_member_catalog() {
    let (declarations, _) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();
    let class = declarations
        .generate_class_like(&CatalogEntry::class_id(), &mut types)
        .unwrap();

    let names = declarations.callable_names(&class);
    assert_eq!(names.len(), 2);
    assert!(names.contains(&Name::init()));
    assert!(names.contains(&Name::new(FUNCTION_NAME)));

    for name in names {
        let id = CallableId::member(&class.id, name.clone());
        let members = declarations.generate_members(&id, &class, &mut types);
        assert_eq!(members.len(), 1, "{name}");
        assert_eq!(members[0].origin.key(), Some(declarations.key()));
        if name.is_init() {
            assert!(members[0].is_constructor());
            assert_eq!(types.lookup_class_type(&class.id), Some(members[0].return_ty));
        } else {
            assert!(members[0].params.is_empty());
            assert_eq!(members[0].return_ty, types.string_type());
        }
    }
}

#[test]
fn test_repeated_queries_are_identical() {
    let (declarations, _) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();
    let class = declarations
        .generate_class_like(&CatalogEntry::class_id(), &mut types)
        .unwrap();

    assert_eq!(declarations.top_level_symbols(), declarations.top_level_symbols());
    assert_eq!(declarations.callable_names(&class), declarations.callable_names(&class));

    for name in [Name::init(), Name::new(FUNCTION_NAME)] {
        let id = CallableId::member(&class.id, name.clone());
        let first = declarations.generate_members(&id, &class, &mut types);
        let second = declarations.generate_members(&id, &class, &mut types);
        assert!(!first.is_empty(), "{name}");
        assert_eq!(first, second, "{name}");
    }
}

#[test]
fn test_responsibility_gate() {
    let (declarations, bodies) = SimplePluginRegistrar::compose();
    assert!(bodies.is_responsible_for(Some(declarations.key())));
    assert!(!bodies.is_responsible_for(Some(GenerationKey::new("SimpleClassGenerator"))));
    assert!(!bodies.is_responsible_for(None));
}

#[test]
fn test_hello_world_round_trip() {
    let mut config = CompilerConfiguration::new("main");
    let storage = attach(&mut config).unwrap();

    let mut frontend = Frontend::new(config.module_name.clone(), storage);
    frontend.resolve_all().unwrap();
    let program = frontend.lower().unwrap();

    let class_id = CatalogEntry::class_id();
    let foo = program
        .module()
        .get_function(&CatalogEntry::Foo.callable_id().unwrap())
        .unwrap();
    assert!(foo.source_span.is_synthetic());

    let mut interp = Interpreter::new(&program);
    let obj = interp.construct(&class_id).unwrap();
    assert_eq!(
        interp.events(),
        &[
            RuntimeEvent::ConstructorEntered(CallableId::constructor(&class_id)),
            RuntimeEvent::ConstructorEntered(CallableId::constructor(
                &synth_host::ClassId::parse("synth.Any").unwrap()
            )),
        ]
    );

    let value = interp
        .call_method(obj, &Name::new(FUNCTION_NAME), Vec::new())
        .unwrap();
    assert_eq!(value, Value::String(GREETING.to_string()));
    assert_eq!(value.as_str(), Some("Hello world"));
}

#[test]
fn test_any_option_fails_naming_it() {
    let mut config = CompilerConfiguration::new("main");
    config.add_plugin_argument(
        synth_host::parse_plugin_argument("plugin:org.demo.synth:greeting=Hi").unwrap(),
    );

    let err = attach(&mut config).err().unwrap();
    assert_eq!(
        err,
        LoadError::Config(synth_host::ConfigError::UnexpectedOption {
            plugin: "org.demo.synth".to_string(),
            name: "greeting".to_string(),
        })
    );
    assert!(err.to_string().contains("greeting"));
}

#[test]
fn test_options_for_other_plugins_are_ignored() {
    let mut config = CompilerConfiguration::new("main");
    config.add_plugin_argument(synth_host::parse_plugin_argument("plugin:org.other:x=1").unwrap());
    assert_eq!(attach(&mut config).unwrap().len(), (1, 1));
}

#[test]
fn test_unknown_requested_id() {
    let manifests = synth_plugin::services::manifests().unwrap();
    let loader = PluginLoader::from_manifests(&manifests).unwrap();
    let mut config = CompilerConfiguration::new("main");
    let mut storage = ExtensionStorage::new();
    assert_eq!(
        loader.attach("org.demo.renamed", &mut config, &mut storage),
        Err(LoadError::PluginNotFound {
            id: "org.demo.renamed".to_string()
        })
    );
}

#[test]
fn test_unrecognized_callable_fails_loudly() {
    let (declarations, bodies) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();
    let class = declarations
        .generate_class_like(&CatalogEntry::class_id(), &mut types)
        .unwrap();
    let foo_id = CatalogEntry::Foo.callable_id().unwrap();
    let mut foo = declarations
        .generate_members(&foo_id, &class, &mut types)
        .pop()
        .unwrap();
    foo.id = CallableId::member(&class.id, "bar");

    let mut symbols = SymbolTable::new();
    symbols.define_class(class).unwrap();
    let ctx = BodyContext::new(&types, &symbols);

    let err = bodies
        .generate_function_body(&foo, declarations.key(), &ctx)
        .unwrap_err();
    assert_eq!(
        err,
        SynthesisError::UnrecognizedCallable {
            callable: "foo.bar.MyClass.bar".to_string()
        }
    );
}

#[test]
fn test_declared_return_type_is_checked() {
    let (declarations, bodies) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();
    let class = declarations
        .generate_class_like(&CatalogEntry::class_id(), &mut types)
        .unwrap();
    let foo_id = CatalogEntry::Foo.callable_id().unwrap();
    let mut foo = declarations
        .generate_members(&foo_id, &class, &mut types)
        .pop()
        .unwrap();
    foo.return_ty = types.number_type();

    let mut symbols = SymbolTable::new();
    symbols.define_class(class).unwrap();
    let ctx = BodyContext::new(&types, &symbols);

    let err = bodies
        .generate_function_body(&foo, declarations.key(), &ctx)
        .unwrap_err();
    assert!(matches!(err, SynthesisError::ReturnTypeMismatch { expected, actual, .. }
        if expected == "number" && actual == "string"));
}

#[test]
fn test_constructor_requires_super_constructor() {
    let (declarations, bodies) = SimplePluginRegistrar::compose();
    let mut types = TypeContext::new();
    let class = declarations
        .generate_class_like(&CatalogEntry::class_id(), &mut types)
        .unwrap();
    let ctor_id = CallableId::constructor(&class.id);
    let ctor = declarations
        .generate_members(&ctor_id, &class, &mut types)
        .pop()
        .unwrap();

    // No root class in this table
    let mut symbols = SymbolTable::new();
    symbols.define_class(class).unwrap();
    let ctx = BodyContext::new(&types, &symbols);

    let err = bodies
        .generate_constructor_body(&ctor, declarations.key(), &ctx)
        .unwrap_err();
    assert_eq!(
        err,
        SynthesisError::MissingSuperConstructor {
            callable: "foo.bar.MyClass.<init>".to_string(),
            class: "synth.Any".to_string(),
        }
    );
}

#[test]
fn test_foreign_body_generator_leaves_bodies_missing() {
    let (declarations, _) = SimplePluginRegistrar::compose();
    let (_, foreign_bodies) = SimplePluginRegistrar::compose();
    let mut storage = ExtensionStorage::new();
    storage.register_declaration_generator(Box::new(declarations));
    storage.register_body_generator(Box::new(foreign_bodies));

    let mut frontend = Frontend::new("main", storage);
    frontend.resolve_all().unwrap();
    assert!(matches!(
        frontend.lower(),
        Err(CompileError::MissingBody { .. })
    ));
}
