//! Wire format of the SIP OPTIONS probe: building the request and picking
//! apart whatever comes back.

pub mod options;
pub mod response;

pub use options::{BRANCH_MAGIC_COOKIE, OptionsRequest};
pub use response::{ParsedResponse, parse_response};
