mod harness;
mod stub;
mod token;

pub use harness::test_rocket;
pub use stub::{StubIdentityIo, StubPaymentIo, StubUser};
pub use token::make_access_token;
