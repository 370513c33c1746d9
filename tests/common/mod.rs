mod app;
mod factory;

#[allow(unused_imports)]
pub use app::TestApp;
#[allow(unused_imports)]
pub use factory::Factory;
