// Here's the list of the FTP commands implemented
pub mod allo;
pub mod cwd;
pub mod dele;
pub mod list;
pub mod mkd;
pub mod noop;
pub mod pwd;
pub mod quit;
pub mod rmd;
pub mod rnfr;
pub mod rnto;
pub mod stor;
pub mod syst;
pub mod type_;
pub mod user;

pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;
