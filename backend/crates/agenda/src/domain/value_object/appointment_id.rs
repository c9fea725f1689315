use kernel::id::Id;

pub struct AppointmentMarker;
pub type AppointmentId = Id<AppointmentMarker>;

impl AppointmentMarker {}
