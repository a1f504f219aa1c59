//! Model rendering.
//!
//! The host renders a model once per pass and per visible entity by calling
//! [`render_model`]. Every root object is rendered in declaration order; each
//! object renders the objects that apply after it while its own state is still
//! active, so dependents inherit the parent's transforms.
//!
//! # Per object
//!
//! 1. Push host state (popped again on every exit path)
//! 2. Pre-render transforms; a skip aborts the object and its dependents
//! 3. Draw the cached geometry if every transform agrees for this pass
//! 4. Post-render transforms
//! 5. Text markings, on the opaque pass only
//! 6. Render dependents
//! 7. Pop host state

use crate::{
    context::{Frame, HostRenderer, StateGuard},
    data_structures::scene_graph::{ObjectGraph, ObjectId},
};

/// Renders every object of `graph` for `frame.entity` in `frame.pass`.
pub fn render_model(graph: &ObjectGraph, host: &mut dyn HostRenderer, frame: &Frame) {
    for &root in graph.roots() {
        render_object(graph, root, host, frame);
    }
}

/// Renders one object and, recursively, everything applying after it.
pub fn render_object(graph: &ObjectGraph, id: ObjectId, host: &mut dyn HostRenderer, frame: &Frame) {
    let Some(object) = graph.get(id) else {
        return;
    };
    let mut host = StateGuard::push(host);
    if !object.pre_render(&mut *host, frame) {
        return;
    }
    if object.should_render(frame) {
        host.render_vertices(object.geometry());
    }
    object.post_render(&mut *host, frame);

    if !frame.pass.is_blended() && host.render_text_markings(frame.entity, object.name()) {
        host.recall_texture();
    }

    for &child in object.children() {
        render_object(graph, child, &mut *host, frame);
    }
}
