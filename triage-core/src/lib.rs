mod rank;
mod store;
mod strategy;
mod task;
mod tier;
mod weights;

pub use crate::{rank::*, store::*, strategy::*, task::*, tier::*, weights::*};
