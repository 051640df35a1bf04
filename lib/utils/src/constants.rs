pub const SECONDS_IN_MINUTE: i64 = 60;
pub const MINUTES_IN_HOUR: i64 = 60;
pub const HOURS_IN_DAY: i64 = 24;
pub const DAYS_IN_MONTH: i64 = 31;
pub const DAYS_IN_YEAR: i64 = 365;


pub const SECONDS_IN_HOUR: i64 = MINUTES_IN_HOUR*SECONDS_IN_MINUTE;
pub const SECONDS_IN_DAY: i64 = HOURS_IN_DAY*SECONDS_IN_HOUR;
pub const SECONDS_IN_MONTH: i64 = DAYS_IN_MONTH*SECONDS_IN_DAY;
pub const SECONDS_IN_YEAR: i64 = DAYS_IN_YEAR*SECONDS_IN_DAY;


pub const SITE_ROOT: &str = "/";
pub const DEFAULT_AVATAR_PATH: &str = "/svg/default_avatar.svg";


pub const MAX_CONTENT_LENGTH: usize = 10000;
