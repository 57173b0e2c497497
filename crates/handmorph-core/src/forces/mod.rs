/// Steady-state forces acting on anchored particles.
pub mod spring;
