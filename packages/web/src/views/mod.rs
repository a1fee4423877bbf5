mod layout;
pub use layout::AppLayout;

mod guarded;
pub use guarded::Guarded;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod preference_setup;
pub use preference_setup::PreferenceSetup;

mod ai_matching;
pub use ai_matching::AiMatching;

mod meeting_list;
pub use meeting_list::MeetingList;

mod meeting_create;
pub use meeting_create::MeetingCreate;

mod meeting_detail;
pub use meeting_detail::MeetingDetail;

mod category;
pub use category::{CategoryDetail, CategoryList};
