//! UI Components
//!
//! Reusable Leptos components.

mod add_person_dialog;
mod avatar;
pub mod board_view;
mod board_column;
mod create_project_modal;
mod due_date_picker;
mod member_search;
mod modal;
mod navbar;
mod priority_select;
mod project_header;
mod sidebar;
mod task_card;
mod title_editor;

pub use add_person_dialog::AddPersonDialog;
pub use avatar::Avatar;
pub use board_view::BoardView;
pub use board_column::BoardColumn;
pub use create_project_modal::CreateProjectModal;
pub use due_date_picker::DueDatePicker;
pub use member_search::MemberSearch;
pub use modal::Modal;
pub use navbar::Navbar;
pub use priority_select::PrioritySelect;
pub use project_header::ProjectHeader;
pub use sidebar::Sidebar;
pub use task_card::TaskCard;
pub use title_editor::TitleEditor;
