pub mod router;
pub mod view;

pub use router::{Transition, ViewRouter};
pub use view::{NavEvent, ViewState};
