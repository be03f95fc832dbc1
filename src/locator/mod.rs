pub mod cascade;
pub mod element_model;
pub mod resolve_page;
pub mod roles;
pub mod test_values;
pub mod widgets;
