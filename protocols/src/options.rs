use std::fmt::Write;

/// RFC 3261 prefix marking a branch as unique per transaction.
pub const BRANCH_MAGIC_COOKIE: &str = "z9hG4bK";

const CRLF: &str = "\r\n";
const FROM_TAG: &str = "monitor";
const USER_AGENT: &str = "SIP Monitor";
const MAX_FORWARDS: u8 = 70;

/// Everything needed to render one OPTIONS request.
///
/// Values are written verbatim; nothing here checks that the addresses or
/// identities are well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsRequest<'a> {
    pub dst_ip: &'a str,
    pub dst_port: u16,
    pub src_ip: &'a str,
    pub src_port: u16,
    pub call_id: &'a str,
    pub branch: &'a str,
    pub from_user: &'a str,
    pub to_user: &'a str,
}

impl OptionsRequest<'_> {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl std::fmt::Display for OptionsRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut msg = String::with_capacity(384);
        write!(msg, "OPTIONS sip:{}:{} SIP/2.0{CRLF}", self.dst_ip, self.dst_port)?;
        write!(
            msg,
            "Via: SIP/2.0/UDP {}:{};branch={}{CRLF}",
            self.src_ip, self.src_port, self.branch
        )?;
        write!(msg, "From: <sip:{}@{}>;tag={FROM_TAG}{CRLF}", self.from_user, self.src_ip)?;
        write!(msg, "To: <sip:{}@{}>{CRLF}", self.to_user, self.dst_ip)?;
        write!(
            msg,
            "Contact: <sip:{}@{}:{}>{CRLF}",
            self.from_user, self.src_ip, self.src_port
        )?;
        write!(msg, "Call-ID: {}{CRLF}", self.call_id)?;
        write!(msg, "CSeq: 1 OPTIONS{CRLF}")?;
        write!(msg, "Max-Forwards: {MAX_FORWARDS}{CRLF}")?;
        write!(msg, "User-Agent: {USER_AGENT}{CRLF}")?;
        write!(msg, "Content-Length: 0{CRLF}")?;
        msg.push_str(CRLF);
        f.write_str(&msg)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
