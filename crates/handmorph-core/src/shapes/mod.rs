/// Template point-cloud generators.
///
/// Four static shapes (heart, flower, saturn, buddha) built from per-particle
/// samplers, plus the firework burst, and a dispatcher that selects among them.
pub mod primitives;
pub mod dispatcher;

pub use dispatcher::{generate, Template, TemplateCloud};
