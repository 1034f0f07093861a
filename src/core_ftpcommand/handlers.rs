use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_network::{pasv, port};
use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use crate::session::{Session, SessionStatus};

/// Routes a recognized command to its handler; `None` gets a 500 reply.
pub async fn dispatch(
    writer: &mut ReplyWriter,
    session: &mut Session,
    command: Option<FtpCommand>,
    arg: &str,
) -> Result<SessionStatus, FtpError> {
    let Some(command) = command else {
        send_response(writer, Reply::new(500, "Command unrecognized")).await?;
        return Ok(SessionStatus::Continue);
    };

    match command {
        FtpCommand::USER => super::user::handle_user_command(writer, arg).await?,
        FtpCommand::CWD => super::cwd::handle_cwd_command(writer, session, arg).await?,
        FtpCommand::PWD => super::pwd::handle_pwd_command(writer, session).await?,
        FtpCommand::MKD => super::mkd::handle_mkd_command(writer, arg).await?,
        FtpCommand::DELE => super::dele::handle_dele_command(writer, arg).await?,
        FtpCommand::RMD => super::rmd::handle_rmd_command(writer, arg).await?,
        FtpCommand::RNFR => super::rnfr::handle_rnfr_command(writer, arg).await?,
        FtpCommand::RNTO => super::rnto::handle_rnto_command(writer, arg).await?,
        FtpCommand::SYST => super::syst::handle_syst_command(writer, session).await?,
        FtpCommand::NOOP => super::noop::handle_noop_command(writer).await?,
        FtpCommand::TYPE => super::type_::handle_type_command(writer, arg).await?,
        FtpCommand::PORT => port::handle_port_command(writer, session, arg).await?,
        FtpCommand::PASV => pasv::handle_pasv_command(writer, session, arg).await?,
        FtpCommand::LIST => super::list::handle_list_command(writer, session, arg).await?,
        FtpCommand::STOR => super::stor::handle_stor_command(writer, session, arg).await?,
        FtpCommand::ALLO => super::allo::handle_allo_command(writer, arg).await?,
        FtpCommand::QUIT => {
            super::quit::handle_quit_command(writer).await?;
            return Ok(SessionStatus::Close);
        }
    }

    Ok(SessionStatus::Continue)
}
