//! Numbered main menu. Option numbers stay fixed across modes so a
//! read-only session shows `[1] [5] [6]`.

use crate::core::state::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Search,
    Add,
    Remove,
    Edit,
    ShowAll,
    Quit,
}

const FULL_MENU: &[MenuOption] = &[
    MenuOption::Search,
    MenuOption::Add,
    MenuOption::Remove,
    MenuOption::Edit,
    MenuOption::ShowAll,
    MenuOption::Quit,
];

const READ_ONLY_MENU: &[MenuOption] = &[MenuOption::Search, MenuOption::ShowAll, MenuOption::Quit];

impl MenuOption {
    pub fn number(self) -> u32 {
        match self {
            MenuOption::Search => 1,
            MenuOption::Add => 2,
            MenuOption::Remove => 3,
            MenuOption::Edit => 4,
            MenuOption::ShowAll => 5,
            MenuOption::Quit => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Search => "Search",
            MenuOption::Add => "Add item",
            MenuOption::Remove => "Remove item",
            MenuOption::Edit => "Edit item",
            MenuOption::ShowAll => "Show All",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Options offered in `mode`, in display order.
pub fn available(mode: Mode) -> &'static [MenuOption] {
    match mode {
        Mode::Persistent => FULL_MENU,
        Mode::Ephemeral => READ_ONLY_MENU,
    }
}

/// Maps a typed option to a menu entry, if `mode` offers it.
pub fn choose(mode: Mode, input: &str) -> Option<MenuOption> {
    let number: u32 = input.trim().parse().ok()?;
    available(mode)
        .iter()
        .copied()
        .find(|option| option.number() == number)
}

/// Menu text, one line per entry.
pub fn render(mode: Mode) -> Vec<String> {
    let mut lines = vec![String::new(), "\t === PLU Lookup === \t".to_string(), String::new()];
    lines.extend(
        available(mode)
            .iter()
            .map(|option| format!("[{}] {}", option.number(), option.label())),
    );
    lines.push(String::new());
    lines
}
