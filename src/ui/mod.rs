pub mod form_field;
pub mod terminal_guard;
pub mod widgets;
pub mod wizard;
