pub mod form;
pub mod map_view;
pub mod notification;
pub mod popup;
pub mod state;
pub mod validators;

pub use form::{FieldError, FormErrors, FormField, StationForm};

pub use map_view::{MapView, PendingRequest, Ticket};

pub use notification::{Notification, NotificationIcon, NotificationId, NotificationQueue};

pub use popup::{PopupAction, StationPopup};

pub use state::{FormKind, ViewState};
