pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const ELLIPSIS: &str = "...";
pub(crate) const ALTERNATIVE_SEPARATOR: &str = " | ";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";
