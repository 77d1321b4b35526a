pub(crate) mod hooks;
pub(crate) mod toaster;
pub(crate) mod ui;
