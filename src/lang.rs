//! Localized string bundle
//!
//! Every user-facing description goes through `get_string` so a deployment
//! can swap the bundle without touching rule logic. Only the English bundle
//! ships with the crate. Unknown identifiers render as `[[identifier]]`,
//! which makes a missing string loud in the UI instead of panicking a
//! request.

/// Look up a localized string by identifier.
pub fn get_string(identifier: &str) -> String {
    lookup(identifier)
        .map(str::to_string)
        .unwrap_or_else(|| format!("[[{identifier}]]"))
}

/// Look up a localized string and substitute `{name}` placeholders.
pub fn get_string_with(identifier: &str, params: &[(&str, &str)]) -> String {
    let mut out = get_string(identifier);
    for (key, value) in params {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

fn lookup(identifier: &str) -> Option<&'static str> {
    let s = match identifier {
        // Availability condition descriptions
        "condition_booking_disabled" => "Booking is currently disabled for this option.",
        "condition_login_blocked" => "Log in to book this option.",
        "condition_login_blocked_full" => {
            "Only logged-in users (not guests) are allowed to book this option."
        }
        "condition_login_ok" => "You are logged in.",
        "condition_login_ok_full" => "You are logged in and allowed to book.",
        "condition_already_booked" => "You have already booked this option.",
        "condition_already_booked_full" => "The user already holds a booked place on this option.",
        "condition_on_waitlist" => "You are on the waiting list for this option.",
        "condition_on_waitlist_full" => "The user is on the waiting list for this option.",
        "condition_cohorts_blocked" => "This option is reserved for members of certain cohorts.",
        "condition_cohorts_blocked_full" => {
            "Booking requires membership in one of these cohorts: {cohorts}"
        }
        "condition_fully_booked" => "This option is fully booked.",
        "condition_fully_booked_full" => {
            "All places and all waiting-list places on this option are taken."
        }
        "condition_ask_for_confirmation" => {
            "This booking must be confirmed. Your request will be placed on the waiting list."
        }
        "condition_price_set" => "Add to cart ({price})",
        "condition_price_set_full" => "This option costs {price} and is booked through checkout.",
        "condition_book_now" => "Book now",
        "condition_book_now_full" => "Click to book this option.",

        // Shortcodes
        "shortcodes_off" => "All shortcodes are turned off on this site.",
        "shortcodes_no_permission" => "You are not allowed to use this shortcode.",
        "shortcodes_unknown" => "Unknown shortcode: {name}",

        // Booking flow
        "booking_confirmed" => "Your booking is confirmed.",
        "booking_waitlisted" => "Your booking request was placed on the waiting list.",

        _ => return None,
    };
    Some(s)
}
