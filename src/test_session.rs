// Scenario tests for the control-channel state machine

#[cfg(test)]
mod tests {
    use crate::config::SessionConfig;
    use crate::core_network::TransferMode;
    use crate::error::FtpError;
    use crate::receiver::DataReceiver;
    use crate::session::{ControlHandler, Session, SessionStatus};
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    #[derive(Default)]
    struct MemoryReceiver {
        uploads: Mutex<Vec<(String, String, Vec<u8>)>>,
    }

    #[async_trait]
    impl DataReceiver for MemoryReceiver {
        async fn receive(
            &self,
            directory: &str,
            name: &str,
            data: &mut (dyn AsyncRead + Send + Unpin),
        ) -> io::Result<()> {
            let mut content = Vec::new();
            data.read_to_end(&mut content).await?;
            self.uploads
                .lock()
                .unwrap()
                .push((directory.to_string(), name.to_string(), content));
            Ok(())
        }
    }

    struct FailingReceiver;

    #[async_trait]
    impl DataReceiver for FailingReceiver {
        async fn receive(
            &self,
            _directory: &str,
            _name: &str,
            _data: &mut (dyn AsyncRead + Send + Unpin),
        ) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    fn config(low: u16, high: u16, attempts: u32) -> Arc<SessionConfig> {
        Arc::new(SessionConfig::new(Ipv4Addr::LOCALHOST, None, low, high, attempts).unwrap())
    }

    fn session_with(receiver: Arc<dyn DataReceiver>) -> Session {
        Session::with_rng(
            config(40000, 41000, 20),
            receiver,
            Box::new(StdRng::seed_from_u64(42)),
        )
    }

    fn session() -> Session {
        session_with(Arc::new(MemoryReceiver::default()))
    }

    async fn run(session: &mut Session, line: &str) -> String {
        let mut out: Vec<u8> = Vec::new();
        session.handle_line(&mut out, line).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn port_args(addr: SocketAddr) -> String {
        let port = addr.port();
        format!("127,0,0,1,{},{}", port >> 8, port & 0xff)
    }

    fn pasv_port(reply: &str) -> u16 {
        let start = reply.find('(').unwrap() + 1;
        let end = reply.find(')').unwrap();
        let fields: Vec<u16> = reply[start..end]
            .split(',')
            .map(|field| field.parse().unwrap())
            .collect();
        fields[4] * 256 + fields[5]
    }

    #[tokio::test]
    async fn test_cwd_then_pwd() {
        let mut session = session();
        assert_eq!(run(&mut session, "PWD").await, "257 \"/\" is current directory\r\n");
        assert_eq!(run(&mut session, "CWD /reports").await, "250 CWD command successful\r\n");
        assert_eq!(
            run(&mut session, "PWD").await,
            "257 \"/reports\" is current directory\r\n"
        );
        assert_eq!(session.current_dir(), "/reports");
    }

    #[tokio::test]
    async fn test_unknown_command_updates_last_command() {
        let mut session = session();
        assert_eq!(run(&mut session, "FOOZ").await, "500 Command unrecognized\r\n");
        assert_eq!(session.last_command(), "FOOZ");
        assert_eq!(run(&mut session, "RETR file").await, "500 Command unrecognized\r\n");
        assert_eq!(session.last_command(), "RETR");
    }

    #[tokio::test]
    async fn test_short_line_is_a_syntax_error() {
        let mut session = session();
        assert_eq!(run(&mut session, "AB").await, "501 Syntax error\r\n");
        assert_eq!(session.last_command(), "AB");
        assert_eq!(run(&mut session, "   ").await, "501 Syntax error\r\n");
        assert_eq!(session.last_command(), "");
        // The session keeps going
        assert_eq!(run(&mut session, "NOOP").await, "200 OK\r\n");
    }

    #[tokio::test]
    async fn test_lowercase_commands_are_accepted() {
        let mut session = session();
        assert_eq!(run(&mut session, "noop").await, "200 OK\r\n");
        assert_eq!(session.last_command(), "NOOP");
    }

    #[tokio::test]
    async fn test_list_as_first_command() {
        let mut session = session();
        assert_eq!(run(&mut session, "LIST").await, "503 Bad sequence of commands\r\n");
        assert_eq!(session.data_connection_mode(), None);
    }

    #[tokio::test]
    async fn test_transfer_needs_immediately_preceding_port_or_pasv() {
        let mut session = session();
        for prefix in ["NOOP", "TYPE I", "CWD /x", "USER anonymous"] {
            run(&mut session, prefix).await;
            assert_eq!(
                run(&mut session, "STOR report.txt").await,
                "503 Bad sequence of commands\r\n"
            );
            assert_eq!(session.data_connection_mode(), None);
        }
    }

    #[tokio::test]
    async fn test_malformed_port_arguments() {
        let mut session = session();
        for args in [
            "",
            "127,0,0,1,8",
            "127,0,0,1,8,73,9",
            "127,0,0,x,8,73",
            "127,0,0,1,8,256",
            "127,0,0,1,-8,73",
        ] {
            assert_eq!(
                run(&mut session, &format!("PORT {}", args)).await,
                "501 Syntax error in parameters or arguments\r\n"
            );
            assert_eq!(session.data_connection_mode(), None);
            assert_eq!(session.last_command(), "PORT");
        }
        // PORT was the last command but nothing was connected
        assert_eq!(run(&mut session, "LIST").await, "503 Bad sequence of commands\r\n");
    }

    #[tokio::test]
    async fn test_active_stor() {
        let receiver = Arc::new(MemoryReceiver::default());
        let mut session = session_with(receiver.clone());
        let peer = TcpListener::bind("127.0.0.1:0").await.unwrap();

        run(&mut session, "CWD /reports").await;
        let port = format!("PORT {}", port_args(peer.local_addr().unwrap()));
        assert_eq!(run(&mut session, &port).await, "200 PORT command successful\r\n");
        assert_eq!(session.data_connection_mode(), Some(TransferMode::Active));

        let (mut client_side, _) = peer.accept().await.unwrap();
        client_side.write_all(b"quarterly numbers").await.unwrap();
        drop(client_side);

        assert_eq!(
            run(&mut session, "STOR report.txt").await,
            "150 Opening binary mode data connection for STOR report.txt\r\n\
             226 Transfer complete for STOR report.txt\r\n"
        );
        assert_eq!(session.data_connection_mode(), None);

        let uploads = receiver.uploads.lock().unwrap();
        assert_eq!(
            *uploads,
            vec![(
                "/reports".to_string(),
                "report.txt".to_string(),
                b"quarterly numbers".to_vec()
            )]
        );
    }

    #[tokio::test]
    async fn test_active_list_sends_empty_listing() {
        let mut session = session();
        let peer = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let port = format!("PORT {}", port_args(peer.local_addr().unwrap()));
        assert_eq!(run(&mut session, &port).await, "200 PORT command successful\r\n");
        assert_eq!(
            run(&mut session, "LIST /foo").await,
            "150 Opening binary mode data connection for LIST /foo\r\n\
             226 Transfer complete for LIST\r\n"
        );
        assert_eq!(session.data_connection_mode(), None);

        let (mut client_side, _) = peer.accept().await.unwrap();
        let mut listing = Vec::new();
        client_side.read_to_end(&mut listing).await.unwrap();
        assert_eq!(listing, b"\r\n");
    }

    #[tokio::test]
    async fn test_port_while_active_connection_open() {
        let mut session = session();
        let peer = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = format!("PORT {}", port_args(peer.local_addr().unwrap()));

        assert_eq!(run(&mut session, &port).await, "200 PORT command successful\r\n");
        assert_eq!(run(&mut session, &port).await, "503 Bad sequence of commands\r\n");
        assert_eq!(session.data_connection_mode(), Some(TransferMode::Active));
    }

    #[tokio::test]
    async fn test_port_connect_failure() {
        let mut session = session();
        let vacant = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = vacant.local_addr().unwrap();
        drop(vacant);

        let port = format!("PORT {}", port_args(addr));
        assert_eq!(run(&mut session, &port).await, "552 Requested file action aborted\r\n");
        assert_eq!(session.data_connection_mode(), None);
    }

    #[tokio::test]
    async fn test_failed_port_clears_passive_connection() {
        let mut session = session();
        assert!(run(&mut session, "PASV").await.starts_with("227 "));

        let vacant = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = vacant.local_addr().unwrap();
        drop(vacant);

        let port = format!("PORT {}", port_args(addr));
        assert_eq!(run(&mut session, &port).await, "552 Requested file action aborted\r\n");
        assert_eq!(session.data_connection_mode(), None);
    }

    #[tokio::test]
    async fn test_passive_list() {
        let mut session = session();
        let reply = run(&mut session, "PASV").await;
        assert!(reply.starts_with("227 Entering Passive Mode (127,0,0,1,"));
        let port = pasv_port(&reply);
        assert!((40000..41000).contains(&port));
        assert_eq!(session.data_connection_mode(), Some(TransferMode::Passive));
        assert_eq!(session.data_connection_port(), Some(port));

        let mut client = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        assert_eq!(
            run(&mut session, "LIST").await,
            "150 Opening binary mode data connection for LIST\r\n\
             226 Transfer complete for LIST\r\n"
        );
        let mut listing = Vec::new();
        client.read_to_end(&mut listing).await.unwrap();
        assert_eq!(listing, b"\r\n");

        // Listener is closed together with the transfer
        assert_eq!(session.data_connection_mode(), None);
        assert!(TcpStream::connect(("127.0.0.1", port)).await.is_err());
    }

    #[tokio::test]
    async fn test_passive_stor() {
        let receiver = Arc::new(MemoryReceiver::default());
        let mut session = session_with(receiver.clone());
        let port = pasv_port(&run(&mut session, "PASV").await);

        let mut client = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        client.write_all(b"content").await.unwrap();
        drop(client);

        assert_eq!(
            run(&mut session, "STOR bar").await,
            "150 Opening binary mode data connection for STOR bar\r\n\
             226 Transfer complete for STOR bar\r\n"
        );
        assert_eq!(session.data_connection_mode(), None);
        assert_eq!(
            *receiver.uploads.lock().unwrap(),
            vec![("/".to_string(), "bar".to_string(), b"content".to_vec())]
        );
    }

    #[tokio::test]
    async fn test_receiver_failure_aborts_stor() {
        let mut session = session_with(Arc::new(FailingReceiver));
        let port = pasv_port(&run(&mut session, "PASV").await);
        let _client = TcpStream::connect(("127.0.0.1", port)).await.unwrap();

        assert_eq!(
            run(&mut session, "STOR bar").await,
            "150 Opening binary mode data connection for STOR bar\r\n\
             552 Requested file action aborted\r\n"
        );
        assert_eq!(session.data_connection_mode(), None);
        assert!(TcpStream::connect(("127.0.0.1", port)).await.is_err());
    }

    #[tokio::test]
    async fn test_pasv_with_all_ports_taken() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();
        let mut session = Session::with_rng(
            config(port, port + 1, 3),
            Arc::new(MemoryReceiver::default()),
            Box::new(StdRng::seed_from_u64(1)),
        );

        assert_eq!(run(&mut session, "PASV").await, "551 Requested action aborted\r\n");
        assert_eq!(session.data_connection_mode(), None);
    }

    #[tokio::test]
    async fn test_pasv_advertises_configured_address() {
        let config = Arc::new(
            SessionConfig::new(
                Ipv4Addr::LOCALHOST,
                Some(Ipv4Addr::new(203, 0, 113, 7)),
                40000,
                41000,
                20,
            )
            .unwrap(),
        );
        let mut session = Session::new(config, Arc::new(MemoryReceiver::default()));
        let reply = run(&mut session, "PASV").await;
        assert!(reply.starts_with("227 Entering Passive Mode (203,0,113,7,"));
        assert_eq!(session.data_connection_port(), Some(pasv_port(&reply)));
    }

    #[tokio::test]
    async fn test_second_pasv_replaces_listener() {
        let mut session = session();
        let first = pasv_port(&run(&mut session, "PASV").await);
        let second = pasv_port(&run(&mut session, "PASV").await);
        assert_eq!(session.data_connection_port(), Some(second));
        if first != second {
            assert!(TcpListener::bind(("127.0.0.1", first)).await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_unused_data_connection_is_released() {
        let mut session = session();
        let port = pasv_port(&run(&mut session, "PASV").await);

        assert_eq!(run(&mut session, "NOOP").await, "200 OK\r\n");
        assert_eq!(session.data_connection_mode(), None);
        assert!(TcpListener::bind(("127.0.0.1", port)).await.is_ok());
        assert_eq!(run(&mut session, "LIST").await, "503 Bad sequence of commands\r\n");
    }

    #[tokio::test]
    async fn test_passive_connection_after_port_is_rejected() {
        let mut session = session();
        let peer = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = format!("PORT {}", port_args(peer.local_addr().unwrap()));

        run(&mut session, "PASV").await;
        // Malformed PORT keeps the passive listener but makes PORT the last command
        run(&mut session, "PORT 1,2,3").await;
        assert_eq!(session.data_connection_mode(), Some(TransferMode::Passive));
        assert_eq!(run(&mut session, "LIST").await, "503 Bad sequence of commands\r\n");
        assert_eq!(session.data_connection_mode(), Some(TransferMode::Passive));

        // A good PORT swaps the passive listener for an active connection
        assert_eq!(run(&mut session, &port).await, "200 PORT command successful\r\n");
        assert_eq!(session.data_connection_mode(), Some(TransferMode::Active));
    }

    #[tokio::test]
    async fn test_simple_commands() {
        let mut session = session();
        let cases = [
            ("USER anonymous", "230 USER LOGGED IN"),
            ("MKD reports", "521 \"reports\" directory exists"),
            ("DELE old.txt", "550 old.txt: no such file or directory"),
            ("RMD archive", "550 archive: no such file or directory"),
            ("RNFR bar", "350 File exists, ready for destination name"),
            ("RNTO baz", "250 RNTO command successful"),
            ("SYST", "215 UNIX Type: Rust custom implementation"),
            ("NOOP", "200 OK"),
            ("TYPE I", "200 Type set to IMAGE NONPRINT"),
            ("TYPE A", "200 Type set to ASCII NONPRINT"),
            ("TYPE E", "504 Command not implemented for that parameter"),
            ("TYPE", "504 Command not implemented for that parameter"),
            ("ALLO 1024", "202 No storage allocation necessary"),
        ];
        for (command, reply) in cases {
            assert_eq!(run(&mut session, command).await, format!("{}\r\n", reply));
        }
        assert_eq!(session.current_dir(), "/");
    }

    #[tokio::test]
    async fn test_quit_closes_session() {
        let mut session = session();
        let mut out: Vec<u8> = Vec::new();
        let status = session.on_command(&mut out, "QUIT").await.unwrap();
        assert_eq!(status, SessionStatus::Close);
        assert_eq!(out, b"221 QUIT command successful\r\n");

        out.clear();
        let status = session.on_command(&mut out, "NOOP").await.unwrap();
        assert_eq!(status, SessionStatus::Continue);
    }

    #[tokio::test]
    async fn test_control_handler_replies() {
        let mut session = session();
        let mut out: Vec<u8> = Vec::new();
        session.on_connect(&mut out).await.unwrap();
        assert_eq!(out, b"220 Service ready\r\n");

        out.clear();
        let fault = FtpError::Io(io::Error::new(io::ErrorKind::Other, "boom"));
        session.on_error(&mut out, &fault).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "500 Unspecified error: control connection I/O failed: boom\r\n"
        );
    }

    #[tokio::test]
    async fn test_session_runs_on_spawned_task() {
        let mut session = session();
        let replies = tokio::spawn(async move {
            let mut out: Vec<u8> = Vec::new();
            session.on_command(&mut out, "PWD").await.unwrap();
            session.on_command(&mut out, "SYST").await.unwrap();
            out
        })
        .await
        .unwrap();
        assert_eq!(
            String::from_utf8(replies).unwrap(),
            "257 \"/\" is current directory\r\n215 UNIX Type: Rust custom implementation\r\n"
        );
    }

    #[test]
    fn test_transfer_commands_watch_the_control_connection() {
        let session = session();
        // Nothing held yet, so LIST answers at once
        assert!(!session.waits_on_data_channel("LIST"));
        assert!(!session.waits_on_data_channel("NOOP"));
    }

    #[tokio::test]
    async fn test_held_connection_makes_transfers_wait() {
        let mut session = session();
        run(&mut session, "PASV").await;
        assert!(session.waits_on_data_channel("LIST"));
        assert!(session.waits_on_data_channel("stor bar"));
        assert!(!session.waits_on_data_channel("PWD"));
        assert!(!session.waits_on_data_channel("AB"));
    }
}

