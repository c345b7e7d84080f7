mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod protected;
pub use protected::Protected;

mod tasks;
pub use tasks::Tasks;
