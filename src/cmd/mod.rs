pub mod inspect;
pub mod intake;
pub mod review;
pub mod store;
