use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct CreatedResponse { pub id: i32 }

/// Event payload; `id` is required for PUT only.
#[derive(ToSchema)]
pub struct EventDoc {
    pub id: Option<i32>,
    pub name: String,
    pub date: Option<chrono::NaiveDate>,
    pub duration: Option<i32>,
    pub location: Option<String>,
    pub time: Option<String>,
    pub category: Option<String>,
    pub organizer_id: i32,
}

#[derive(ToSchema)]
pub struct ActivityDoc {
    pub id: Option<i32>,
    pub name: String,
    pub duration: Option<i32>,
    pub event_id: i32,
}

/// `email` is optional on POST and required on PUT.
#[derive(ToSchema)]
pub struct AttendeeDoc {
    pub id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub event_id: i32,
}

#[derive(ToSchema)]
pub struct OrganizerDoc {
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub roles: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::events::list,
        crate::routes::events::get,
        crate::routes::events::get_by_name,
        crate::routes::events::create,
        crate::routes::events::update,
        crate::routes::events::delete,
        crate::routes::events::by_organizer,
        crate::routes::events::activities,
        crate::routes::events::attendees,
        crate::routes::events::organizer,
        crate::routes::activities::list,
        crate::routes::activities::get,
        crate::routes::activities::get_by_name,
        crate::routes::activities::create,
        crate::routes::activities::update,
        crate::routes::activities::delete,
        crate::routes::attendees::list,
        crate::routes::attendees::get,
        crate::routes::attendees::get_by_name,
        crate::routes::attendees::create,
        crate::routes::attendees::update,
        crate::routes::attendees::delete,
        crate::routes::organizers::list,
        crate::routes::organizers::get,
        crate::routes::organizers::get_by_name,
        crate::routes::organizers::create,
        crate::routes::organizers::update,
        crate::routes::organizers::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CreatedResponse,
            EventDoc,
            ActivityDoc,
            AttendeeDoc,
            OrganizerDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "event"),
        (name = "activity"),
        (name = "attendee"),
        (name = "organizer")
    )
)]
pub struct ApiDoc;
