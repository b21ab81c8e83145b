//! Index endpoint handler.
//!
//! Lists the available routes as plain text.

use tracing::debug;

/// Route listing served at `/`
pub const ROUTE_LISTING: &str = "Welcome to the Hawaii Weather Local API!\n\
\n\
Here are the available routes:\n\
/api/v1.0/precipitation\n\
/api/v1.0/stations\n\
/api/v1.0/tobs\n\
/api/v1.0/<start>            (start as MMDDYYYY)\n\
/api/v1.0/<start>/<end>      (start and end as MMDDYYYY, inclusive)\n";

/// Handle GET / requests
pub async fn index_handler() -> &'static str {
    debug!(endpoint = "/", "Serving route listing");
    ROUTE_LISTING
}
