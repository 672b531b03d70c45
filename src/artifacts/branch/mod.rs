pub mod branch_name;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const REF_PREFIX: &str = "refs/heads/";
/// Branch HEAD is attached to in a fresh repository
pub const DEFAULT_BRANCH: &str = "main";
