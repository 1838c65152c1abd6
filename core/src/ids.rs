use sipmon_protocols::BRANCH_MAGIC_COOKIE;
use uuid::Uuid;

/// Source of the per-request identifiers.
///
/// Every call must return a value never handed out before.
pub trait IdSource {
    fn call_id(&mut self) -> String;
    fn branch(&mut self) -> String;
}

/// Random v4 UUIDs. Branches carry the magic cookie followed by a hyphen.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn call_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }

    fn branch(&mut self) -> String {
        format!("{BRANCH_MAGIC_COOKIE}-{}", Uuid::new_v4())
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn call_id(&mut self) -> String {
        (**self).call_id()
    }

    fn branch(&mut self) -> String {
        (**self).branch()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
