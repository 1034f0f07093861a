/// Commands understood by the server.
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    CWD,
    PWD,
    MKD,
    DELE,
    RMD,
    RNFR,
    RNTO,
    SYST,
    NOOP,
    TYPE,
    PORT,
    PASV,
    LIST,
    STOR,
    QUIT,
    ALLO,
}

impl FtpCommand {
    /// Matches an already upper-cased command token.
    pub fn from_token(token: &str) -> Option<FtpCommand> {
        match token {
            "USER" => Some(FtpCommand::USER),
            "CWD" => Some(FtpCommand::CWD),
            "PWD" => Some(FtpCommand::PWD),
            "MKD" => Some(FtpCommand::MKD),
            "DELE" => Some(FtpCommand::DELE),
            "RMD" => Some(FtpCommand::RMD),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "SYST" => Some(FtpCommand::SYST),
            "NOOP" => Some(FtpCommand::NOOP),
            "TYPE" => Some(FtpCommand::TYPE),
            "PORT" => Some(FtpCommand::PORT),
            "PASV" => Some(FtpCommand::PASV),
            "LIST" => Some(FtpCommand::LIST),
            "STOR" => Some(FtpCommand::STOR),
            "QUIT" => Some(FtpCommand::QUIT),
            "ALLO" => Some(FtpCommand::ALLO),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FtpCommand::USER => "USER",
            FtpCommand::CWD => "CWD",
            FtpCommand::PWD => "PWD",
            FtpCommand::MKD => "MKD",
            FtpCommand::DELE => "DELE",
            FtpCommand::RMD => "RMD",
            FtpCommand::RNFR => "RNFR",
            FtpCommand::RNTO => "RNTO",
            FtpCommand::SYST => "SYST",
            FtpCommand::NOOP => "NOOP",
            FtpCommand::TYPE => "TYPE",
            FtpCommand::PORT => "PORT",
            FtpCommand::PASV => "PASV",
            FtpCommand::LIST => "LIST",
            FtpCommand::STOR => "STOR",
            FtpCommand::QUIT => "QUIT",
            FtpCommand::ALLO => "ALLO",
        }
    }

    /// PORT/PASV set a data connection up, LIST/STOR consume it.
    pub fn uses_data_connection(&self) -> bool {
        matches!(
            self,
            FtpCommand::PORT | FtpCommand::PASV | FtpCommand::LIST | FtpCommand::STOR
        )
    }
}
