pub mod money;
pub mod tabs;
pub mod toast;
