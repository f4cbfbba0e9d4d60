//! Service-level tests: registration, script assembly, URLs and js config.

use std::io;

use indexmap::IndexMap;
use scriptgraph::{
    DependencyDescriptor, FetchMode, ModuleDescriptor, ResourceId, ScriptResourceDescriptor,
};
use scriptgraph_config::{ScriptResources, ServiceSettings, StaticScriptResource};

use crate::{ScriptService, ScriptSource, ServiceError};

/// In-memory files keyed by `(context, path)`.
#[derive(Default)]
struct MemorySource {
    files: IndexMap<(String, String), String>,
}

impl MemorySource {
    fn with(mut self, context: &str, path: &str, text: &str) -> Self {
        self.files
            .insert((context.to_string(), path.to_string()), text.to_string());
        self
    }
}

impl ScriptSource for MemorySource {
    fn read(&self, context_path: &str, path: &str, _locale: Option<&str>) -> io::Result<Option<String>> {
        Ok(self
            .files
            .get(&(context_path.to_string(), path.to_string()))
            .cloned())
    }
}

fn settings() -> ServiceSettings {
    ServiceSettings {
        version: "1.0".into(),
        ..ServiceSettings::default()
    }
}

fn local(path: &str) -> ModuleDescriptor {
    ModuleDescriptor::local_path(path)
}

fn shared(name: &str) -> ResourceId {
    ResourceId::shared(name)
}

#[test]
fn register_is_all_or_nothing() {
    let service = ScriptService::new(settings(), MemorySource::default());

    let mut first = ScriptResources::new("/a");
    first.descriptors.push(ScriptResourceDescriptor::immediate(shared("a")));
    first
        .static_resources
        .push(StaticScriptResource::new("/a", None, "/js/s.js").unwrap());
    service.register(&first).unwrap();

    // New paths and a new static script, but a duplicate resource id.
    let mut second = ScriptResources::new("/b");
    second.descriptors.push(ScriptResourceDescriptor::immediate(shared("a")));
    second
        .static_resources
        .push(StaticScriptResource::new("/b", None, "/js/other.js").unwrap());
    second.paths.insert("lib".into(), vec!["/lib".into()]);
    let err = service.register(&second).unwrap_err();
    assert!(err.is_duplicate());
    assert!(matches!(err, ServiceError::Graph(_)));

    assert!(service.static_resource("/js/other.js").is_none());
    assert!(service.path_mappings().entries().is_empty());
    assert!(service.static_resource("/js/s.js").is_some());
}

#[test]
fn unregister_removes_everything_of_a_context() {
    let service = ScriptService::new(settings(), MemorySource::default());

    let mut resources = ScriptResources::new("/a");
    resources.descriptors.push(ScriptResourceDescriptor::on_load(shared("m")));
    resources
        .static_resources
        .push(StaticScriptResource::new("/a", None, "/js/s.js").unwrap());
    resources.paths.insert("lib".into(), vec!["/lib".into()]);
    service.register(&resources).unwrap();

    service.unregister(&resources);
    assert!(service.graph().is_empty());
    assert!(service.static_resource("/js/s.js").is_none());
    assert!(service.path_mappings().entries().is_empty());
}

#[test]
fn immediate_script_gets_the_define_trailer() {
    let source = MemorySource::default().with("/a", "/js/base.js", "/* licence */\nvar base = 1;");
    let service = ScriptService::new(settings(), source);

    let mut resources = ScriptResources::new("/a");
    resources
        .descriptors
        .push(ScriptResourceDescriptor::immediate(shared("base")).module(local("/js/base.js")));
    service.register(&resources).unwrap();

    let text = service.script(&shared("base"), None).unwrap().unwrap();
    assert_eq!(
        text,
        "var base = 1;\nif (typeof define === 'function' && define.amd && !require.specified('SHARED/base')) {define('SHARED/base');}"
    );
}

#[test]
fn on_load_script_is_wrapped_in_define() {
    let source = MemorySource::default()
        .with("/a", "/js/second.js", "// second\nb();")
        .with("/a", "/js/first.js", "a();");
    let service = ScriptService::new(settings(), source);

    let mut resources = ScriptResources::new("/a");
    resources.descriptors.extend([
        ScriptResourceDescriptor::on_load(shared("dojo/dom")),
        ScriptResourceDescriptor::on_load(shared("text")),
        ScriptResourceDescriptor::on_load(shared("app"))
            .depends_on(shared("dojo/dom"))
            .with_dependency(DependencyDescriptor::new(shared("text")).with_plugin_resource("/tpl.html"))
            .depends_on(shared("require"))
            .module(local("/js/second.js").with_priority(2))
            .module(local("/js/first.js").with_priority(1)),
    ]);
    service.register(&resources).unwrap();

    let text = service.script(&shared("app"), None).unwrap().unwrap();
    assert_eq!(
        text,
        "\ndefine('SHARED/app', [\"SHARED/dojo/dom\",\"SHARED/text!/tpl.html\",\"require\"], function(dom,text,require) {\n\
         var require = eXo.require, requirejs = eXo.require,define = eXo.define;\n\
         eXo.define.names=[\"dom\",\"text!/tpl.html\",\"require\"];\n\
         eXo.define.deps=[dom,text,eXo.require];\n\
         return a();b();\n});"
    );
}

#[test]
fn native_amd_is_served_verbatim() {
    let source = MemorySource::default().with("/a", "/amd/x.js", "define([], function() {});");
    let service = ScriptService::new(settings(), source);

    let mut resources = ScriptResources::new("/a");
    resources.descriptors.push(
        ScriptResourceDescriptor::on_load(shared("x"))
            .native_amd(true)
            .module(local("/amd/x.js")),
    );
    service.register(&resources).unwrap();

    let text = service.script(&shared("x"), None).unwrap().unwrap();
    assert_eq!(text, "define([], function() {});");
}

#[test]
fn group_concatenates_members_between_markers() {
    let source = MemorySource::default()
        .with("/a", "/js/a.js", "a();")
        .with("/a", "/js/b.js", "b();");
    let service = ScriptService::new(settings(), source);

    let mut resources = ScriptResources::new("/a");
    resources.descriptors.extend([
        ScriptResourceDescriptor::on_load(shared("a")).in_group("core").module(local("/js/a.js")),
        ScriptResourceDescriptor::on_load(shared("b")).in_group("core").module(local("/js/b.js")),
    ]);
    service.register(&resources).unwrap();

    let text = service.script(&ResourceId::group("core"), None).unwrap().unwrap();
    assert!(text.starts_with("\n//Begin SHARED/a\n"));
    assert!(text.contains("\n//End SHARED/a\n//Begin SHARED/b\n"));
    assert!(text.ends_with("\n//End SHARED/b"));
    assert!(service.script(&ResourceId::group("nope"), None).unwrap().is_none());
}

#[test]
fn urls_follow_the_handler_layout() {
    let service = ScriptService::new(settings(), MemorySource::default());

    let mut resources = ScriptResources::new("/a");
    resources.descriptors.extend([
        ScriptResourceDescriptor::on_load(shared("i18n"))
            .supported_locale("fr")
            .module(local("/js/i18n.js")),
        ScriptResourceDescriptor::on_load(shared("cdn"))
            .module(ModuleDescriptor::remote("https://cdn.example.com/lib.js")),
        ScriptResourceDescriptor::on_load(shared("g1")).in_group("grp"),
    ]);
    service.register(&resources).unwrap();

    assert_eq!(
        service.generate_url(&shared("i18n"), true, Some("fr-CA")).as_deref(),
        Some("/portal/scripts/1.0/SHARED/i18n-fr-min.js")
    );
    assert_eq!(
        service.generate_url(&shared("i18n"), false, Some("de")).as_deref(),
        Some("/portal/scripts/1.0/SHARED/i18n.js")
    );
    assert_eq!(
        service.generate_url(&shared("cdn"), true, None).as_deref(),
        Some("https://cdn.example.com/lib.js")
    );
    assert_eq!(
        service.generate_url(&ResourceId::group("grp"), false, None).as_deref(),
        Some("/portal/scripts/1.0/GROUP/grp.js")
    );
    assert!(service.generate_url(&shared("missing"), false, None).is_none());
}

#[test]
fn js_config_lists_paths_and_shims() {
    let service = ScriptService::new(
        ServiceSettings {
            development: true,
            ..settings()
        },
        MemorySource::default(),
    );

    let mut resources = ScriptResources::new("/a");
    resources.paths.insert("dojo".into(), vec!["/dojo/dojo".into()]);
    resources
        .paths
        .insert("multi".into(), vec!["/one".into(), "/two".into()]);
    resources.descriptors.extend([
        ScriptResourceDescriptor::immediate(shared("base")),
        ScriptResourceDescriptor::immediate(shared("ui")).depends_on(shared("base")),
        ScriptResourceDescriptor::on_load(shared("m1")).in_group("core"),
        ScriptResourceDescriptor::on_load(shared("m2")).in_group("core"),
        ScriptResourceDescriptor::on_load(shared("amd")).native_amd(true),
    ]);
    service.register(&resources).unwrap();

    let config = service.js_config(None);
    assert_eq!(config["baseUrl"], "/portal/scripts/1.0/SHARED");
    assert_eq!(config["paths"]["dojo"], "/dojo/dojo");
    assert_eq!(config["paths"]["multi"][1], "/two");
    assert_eq!(config["paths"]["SHARED/base"], "/portal/scripts/1.0/SHARED/base");
    assert_eq!(config["paths"]["SHARED/m1"], "/portal/scripts/1.0/GROUP/core");
    assert_eq!(config["paths"]["SHARED/m2"], "/portal/scripts/1.0/GROUP/core");
    assert!(config["paths"].get("SHARED/amd").is_none());
    assert_eq!(config["shim"]["SHARED/ui"]["deps"][0], "SHARED/base");
    assert!(config["shim"].get("SHARED/base").is_none());
}

#[test]
fn resolve_ids_delegates_to_the_graph() {
    let service = ScriptService::new(settings(), MemorySource::default());
    let mut resources = ScriptResources::new("/a");
    resources.descriptors.extend([
        ScriptResourceDescriptor::on_load(shared("a")).depends_on(shared("b")),
        ScriptResourceDescriptor::on_load(shared("b")),
    ]);
    service.register(&resources).unwrap();

    let resolved = service.resolve_ids([(shared("a"), Some(FetchMode::OnLoad))]);
    let ids: Vec<_> = resolved.keys().map(|r| r.id().clone()).collect();
    assert_eq!(ids, vec![shared("b"), shared("a")]);
}
