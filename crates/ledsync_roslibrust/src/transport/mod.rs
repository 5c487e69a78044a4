//! Transport glue. Only roslibrust (rosbridge) is wired today.

pub mod roslibrust;
