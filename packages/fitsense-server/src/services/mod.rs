pub(crate) mod generation;
pub(crate) mod seed;
pub(crate) mod users;
pub(crate) mod workouts;
