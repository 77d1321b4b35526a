pub(crate) mod use_content_actions;
