use std::fmt::Display;

use log::info;

pub fn trace_value<T: Display>(enabled: bool, title: &str, value: T) -> bool {
    if !enabled {
        return false;
    }

    info!("{title}: {value}");
    true
}
