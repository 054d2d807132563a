mod bounds;
mod collide;
mod forces;
mod node;
mod quadtree;
mod session;
mod stepper;

pub use bounds::Bounds;
pub use forces::ForceParams;
pub use node::{NodeId, NodePosition};
pub use session::Session;
pub use stepper::FrameSink;
