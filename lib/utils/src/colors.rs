use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Colors of the lines connecting a comment to its replies
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ThreadColor {
    Gray,
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
}

pub const THREAD_COLOR_PALETTE: [ThreadColor; 5] = [
    ThreadColor::Blue,
    ThreadColor::Purple,
    ThreadColor::Green,
    ThreadColor::Orange,
    ThreadColor::Pink,
];

impl ThreadColor {
    /// Returns the thread color for a comment at `depth`. Root comments get the neutral color,
    /// replies walk the palette and stay on its last color once it is exhausted.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 => ThreadColor::Gray,
            depth => THREAD_COLOR_PALETTE[(depth - 1).min(THREAD_COLOR_PALETTE.len() - 1)],
        }
    }

    pub fn to_border_class(&self) -> &'static str {
        match self {
            ThreadColor::Gray => "border-gray-400 dark:border-gray-500",
            ThreadColor::Blue => "border-blue-400 dark:border-blue-300",
            ThreadColor::Purple => "border-purple-400 dark:border-purple-300",
            ThreadColor::Green => "border-green-400 dark:border-green-300",
            ThreadColor::Orange => "border-orange-400 dark:border-orange-300",
            ThreadColor::Pink => "border-pink-400 dark:border-pink-300",
        }
    }

    pub fn to_bg_class(&self) -> &'static str {
        match self {
            ThreadColor::Gray => "bg-gray-400 dark:bg-gray-500",
            ThreadColor::Blue => "bg-blue-400 dark:bg-blue-300",
            ThreadColor::Purple => "bg-purple-400 dark:bg-purple-300",
            ThreadColor::Green => "bg-green-400 dark:bg-green-300",
            ThreadColor::Orange => "bg-orange-400 dark:bg-orange-300",
            ThreadColor::Pink => "bg-pink-400 dark:bg-pink-300",
        }
    }
}
