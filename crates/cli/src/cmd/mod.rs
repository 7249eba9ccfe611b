mod gen_manifest;
mod show;
mod vars;

pub use gen_manifest::cmd_gen;
pub use show::cmd_show;
pub use vars::cmd_vars;
