use vehicle_ngin::{
    config::ClientRenderingConfig,
    context::{GeometryHandle, Pass},
    definitions::EntityDefinition,
    render::{render_model, render_object},
    resources::{cache::GeometryCache, load_model},
    ModelError,
};

use crate::common::test_utils::{
    HostCall, RecordingHost, TestEntity, frame, geometry, init_logger, load,
};
mod common;

/// Builds a definition where each `(object, parent)` pair applies after `parent`.
fn apply_after(pairs: &[(&str, &str)]) -> EntityDefinition {
    let objects = pairs
        .iter()
        .map(|(object, parent)| {
            format!(r#"{{"objectName": "{}", "applyAfter": "{}"}}"#, object, parent)
        })
        .collect::<Vec<_>>()
        .join(",");
    EntityDefinition::from_json(&format!(
        r#"{{"rendering": {{"animatedObjects": [{}]}}}}"#,
        objects
    ))
    .expect("definition should parse")
}

fn hood_gated_body() -> EntityDefinition {
    EntityDefinition::from_json(
        r#"{
            "rendering": {
                "animatedObjects": [
                    {
                        "objectName": "body",
                        "animations": [{
                            "animationType": "visibility",
                            "variable": "hood",
                            "clampMin": 1,
                            "clampMax": 1
                        }]
                    },
                    {"objectName": "door", "applyAfter": "body"}
                ]
            }
        }"#,
    )
    .expect("definition should parse")
}

#[test]
fn dependent_renders_inside_parent_state() {
    init_logger();
    let mut host = RecordingHost::new();
    let graph = load(&["body", "door"], &apply_after(&[("door", "body")]), &mut host);
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    render_model(&graph, &mut host, &frame(&entity, Pass::Opaque, &settings));

    assert_eq!(
        host.calls,
        vec![
            HostCall::Push,
            HostCall::Render(GeometryHandle(0)),
            HostCall::TextMarkings("body".to_string()),
            HostCall::Push,
            HostCall::Render(GeometryHandle(1)),
            HostCall::TextMarkings("door".to_string()),
            HostCall::Pop,
            HostCall::Pop,
        ]
    );
}

#[test]
fn graph_links_roots_and_children() {
    let mut host = RecordingHost::new();
    let graph = load(
        &["a", "c1", "b", "c2"],
        &apply_after(&[("c1", "a"), ("c2", "a")]),
        &mut host,
    );
    let names = |ids: &[_]| {
        ids.iter()
            .map(|&id| graph.get(id).map(|object| object.name().to_string()))
            .collect::<Option<Vec<_>>>()
    };
    assert_eq!(names(graph.roots()), Some(vec!["a".to_string(), "b".to_string()]));
    let a = graph.object("a").expect("a should be loaded");
    assert_eq!(names(a.children()), Some(vec!["c1".to_string(), "c2".to_string()]));
    assert_eq!(graph.object("c2").and_then(|object| object.apply_after()), Some("a"));
    assert_eq!(
        graph.objects().map(|object| object.name()).collect::<Vec<_>>(),
        vec!["a", "c1", "b", "c2"]
    );
}

#[test]
fn children_render_in_declaration_order() {
    let mut host = RecordingHost::new();
    let graph = load(
        &["a", "c1", "b", "c2"],
        &apply_after(&[("c1", "a"), ("c2", "a")]),
        &mut host,
    );
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    render_model(&graph, &mut host, &frame(&entity, Pass::Opaque, &settings));

    assert_eq!(
        host.draws(),
        vec![GeometryHandle(0), GeometryHandle(1), GeometryHandle(3), GeometryHandle(2)]
    );
    assert!(host.is_balanced());
}

#[test]
fn nested_chains_render_depth_first() {
    let mut host = RecordingHost::new();
    let graph = load(
        &["gear", "strut", "wheel", "hub"],
        &apply_after(&[("hub", "wheel"), ("wheel", "strut"), ("strut", "gear")]),
        &mut host,
    );
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    render_model(&graph, &mut host, &frame(&entity, Pass::Opaque, &settings));

    assert_eq!(
        host.draws(),
        vec![GeometryHandle(0), GeometryHandle(1), GeometryHandle(2), GeometryHandle(3)]
    );
    let pushes = host.calls.iter().take_while(|call| **call != HostCall::Pop);
    assert_eq!(pushes.filter(|call| **call == HostCall::Push).count(), 4);
    assert!(host.is_balanced());
}

#[test]
fn skipped_parent_skips_dependents_and_restores_state() {
    let mut host = RecordingHost::new();
    let graph = load(&["body", "door"], &hood_gated_body(), &mut host);
    let settings = ClientRenderingConfig::default();

    let closed = TestEntity::new().with_variable("hood", 0.0);
    render_model(&graph, &mut host, &frame(&closed, Pass::Opaque, &settings));
    assert_eq!(host.calls, vec![HostCall::Push, HostCall::Pop]);

    host.calls.clear();
    let open = TestEntity::new().with_variable("hood", 1.0);
    render_model(&graph, &mut host, &frame(&open, Pass::Opaque, &settings));
    assert_eq!(host.draws(), vec![GeometryHandle(0), GeometryHandle(1)]);
    assert!(host.is_balanced());
}

#[test]
fn blended_pass_skips_solid_draws_and_markings() {
    let mut host = RecordingHost::new();
    let graph = load(
        &["body", "visor_translucent"],
        &apply_after(&[("visor_translucent", "body")]),
        &mut host,
    );
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    render_model(&graph, &mut host, &frame(&entity, Pass::Blended, &settings));

    assert_eq!(
        host.calls,
        vec![
            HostCall::Push,
            HostCall::Push,
            HostCall::Render(GeometryHandle(1)),
            HostCall::Pop,
            HostCall::Pop,
        ]
    );
}

#[test]
fn text_markings_recall_texture() {
    let mut host = RecordingHost::new();
    let graph = load(&["body"], &EntityDefinition::default(), &mut host);
    host.markings.insert("body".to_string());
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    render_model(&graph, &mut host, &frame(&entity, Pass::Opaque, &settings));

    assert_eq!(
        host.calls,
        vec![
            HostCall::Push,
            HostCall::Render(GeometryHandle(0)),
            HostCall::TextMarkings("body".to_string()),
            HostCall::RecallTexture,
            HostCall::Pop,
        ]
    );
}

#[test]
fn render_object_renders_one_subtree() {
    let mut host = RecordingHost::new();
    let graph = load(
        &["body", "door", "trunk"],
        &apply_after(&[("door", "body")]),
        &mut host,
    );
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();
    let door = graph.id_of("door").expect("door should be loaded");

    render_object(&graph, door, &mut host, &frame(&entity, Pass::Opaque, &settings));

    assert_eq!(host.draws(), vec![GeometryHandle(1)]);
}

#[test]
fn orphaned_object_is_never_rendered() {
    init_logger();
    let mut host = RecordingHost::new();
    let graph = load(&["body", "ghost"], &apply_after(&[("ghost", "missing")]), &mut host);
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    assert_eq!(graph.len(), 2);
    render_model(&graph, &mut host, &frame(&entity, Pass::Opaque, &settings));
    assert_eq!(host.draws(), vec![GeometryHandle(0)]);
}

#[test]
fn empty_model_renders_nothing() {
    let mut host = RecordingHost::new();
    let graph = load(&[], &EntityDefinition::default(), &mut host);
    let settings = ClientRenderingConfig::default();
    let entity = TestEntity::new();

    assert!(graph.is_empty());
    render_model(&graph, &mut host, &frame(&entity, Pass::Opaque, &settings));
    assert!(host.calls.is_empty());
}

#[test]
fn mutual_apply_after_is_rejected() {
    let mut host = RecordingHost::new();
    let result = load_model(
        "loop",
        &geometry(&["body", "a", "b"]),
        &apply_after(&[("a", "b"), ("b", "a")]),
        &GeometryCache::new(),
        &mut host,
    );
    let err = result.expect_err("cycle should be rejected");
    assert_eq!(
        err,
        ModelError::CyclicApplyAfter {
            model: "loop".to_string(),
            objects: vec!["a".to_string(), "b".to_string()],
        }
    );
    assert_eq!(err.to_string(), "cyclic applyAfter in model loop: a, b");
}

#[test]
fn self_reference_is_rejected() {
    let mut host = RecordingHost::new();
    let result = load_model(
        "selfish",
        &geometry(&["mirror"]),
        &apply_after(&[("mirror", "mirror")]),
        &GeometryCache::new(),
        &mut host,
    );
    assert!(matches!(
        result,
        Err(ModelError::CyclicApplyAfter { objects, .. }) if objects == vec!["mirror".to_string()]
    ));
}

#[test]
fn long_cycle_reports_every_member() {
    let mut host = RecordingHost::new();
    let result = load_model(
        "ring",
        &geometry(&["a", "b", "c", "tail"]),
        &apply_after(&[("a", "c"), ("b", "a"), ("c", "b"), ("tail", "c")]),
        &GeometryCache::new(),
        &mut host,
    );
    match result {
        Err(ModelError::CyclicApplyAfter { objects, .. }) => {
            assert!(["a", "b", "c"].iter().all(|name| objects.iter().any(|o| o == name)));
        }
        other => panic!("expected a cycle error, got {:?}", other.map(|graph| graph.len())),
    }
}

#[test]
fn duplicate_object_names_are_rejected() {
    let mut host = RecordingHost::new();
    let result = load_model(
        "twins",
        &geometry(&["body", "body"]),
        &EntityDefinition::default(),
        &GeometryCache::new(),
        &mut host,
    );
    assert_eq!(
        result.map(|graph| graph.len()),
        Err(ModelError::DuplicateObject {
            model: "twins".to_string(),
            object: "body".to_string(),
        })
    );
}
