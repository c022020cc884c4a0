//! Pages
//!
//! One component per route.

mod character;
mod home;
mod login;
mod profile;
mod register;
mod simulator;

pub use character::CharacterPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use simulator::SimulatorPage;
