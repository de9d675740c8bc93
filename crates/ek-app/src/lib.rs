/// Command-line front end of the EUC-KR table generator.

pub mod cli;
pub mod run;
