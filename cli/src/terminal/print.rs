use sipmon_core::ProbeResult;

/// Exit status for bad or missing flags.
pub const USAGE_EXIT_CODE: i32 = 2;

const USAGE: &str = "  sip-options-once -src-ip <IP> -src-port <PORT> -ips <ip1,ip2,...> \
[-kam-port 5060] [-timeout 2] [-sip-user SIPMonitor] [-to-user SIPMonitor]";

/// Prints one result as `<ip> - <description>`.
pub fn result_line(result: &ProbeResult) {
    println!("{result}");
}

pub fn usage_and_exit(reason: Option<&str>) -> ! {
    if let Some(reason) = reason {
        println!("{reason}");
    }
    println!("usage:");
    println!("{USAGE}");
    std::process::exit(USAGE_EXIT_CODE);
}
