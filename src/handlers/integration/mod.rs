// handlers/integration - GHL integration lifecycle endpoints
//
// Connecting happens elsewhere; these routes configure, read and remove an
// existing integration.

pub mod contacts_count; // GET /contacts-count
pub mod disconnect;     // DELETE /disconnect
pub mod settings;       // GET|PUT /autosync-settings
pub mod utils;

pub use contacts_count::get as contacts_count_get;
pub use disconnect::delete as disconnect_delete;
pub use settings::get as settings_get;
pub use settings::put as settings_put;
