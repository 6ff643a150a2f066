// crates/vidshelf-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing AppModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field for it in app.rs and call it from update()

pub mod library;
pub mod player;

use egui::Ui;
use vidshelf_core::commands::AppCommand;
use vidshelf_core::Session;

use crate::context::AppContext;

/// Every panel implements this trait.
/// Panels read the session and emit commands: they never mutate it directly.
pub trait AppModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:      &mut Ui,
        session: &Session,
        ctx:     &AppContext,
        cmd:     &mut Vec<AppCommand>,
    );
}
