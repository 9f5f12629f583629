//! Integration tests for the FTP client.
//!
//! Control and data channels are scripted with `tokio_test` mocks, so the
//! tests check both the bytes the client sends and how it reads replies.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio_test::io::{Builder, Mock};

use ftpkit_client::{
    Authenticated, Client, Connector, Error, ErrorCategory, FileType, Result, TransferType,
};

/// Hands out scripted data connections and records where they were opened.
#[derive(Clone, Default)]
struct MockConnector {
    streams: Arc<Mutex<VecDeque<Mock>>>,
    addresses: Arc<Mutex<Vec<SocketAddr>>>,
}

impl MockConnector {
    fn with_streams(streams: impl IntoIterator<Item = Mock>) -> Self {
        let connector = Self::default();
        connector.streams.lock().unwrap().extend(streams);
        connector
    }

    fn addresses(&self) -> Vec<SocketAddr> {
        self.addresses.lock().unwrap().clone()
    }
}

impl Connector for MockConnector {
    type Stream = Mock;

    fn connect(&self, addr: SocketAddr) -> impl Future<Output = Result<Mock>> + Send {
        self.addresses.lock().unwrap().push(addr);
        let stream = self.streams.lock().unwrap().pop_front();
        async move { stream.ok_or(Error::Closed) }
    }
}

const PASV_REPLY: &[u8] = b"227 Entering Passive Mode (127,0,0,1,4,1).\r\n";

/// Control script up to a completed anonymous login.
fn logged_in() -> Builder {
    let mut builder = Builder::new();
    builder
        .read(b"220-Welcome to the test server\r\n220 Ready\r\n")
        .write(b"USER anonymous\r\n")
        .read(b"331 Guest login ok, send password\r\n")
        .write(b"PASS anonymous\r\n")
        .read(b"230 Logged in\r\n");
    builder
}

async fn login(
    control: Mock,
    connector: MockConnector,
) -> Client<Mock, MockConnector, Authenticated> {
    Client::from_stream(control, connector)
        .await
        .unwrap()
        .login("anonymous", "anonymous")
        .await
        .unwrap()
}

#[tokio::test]
async fn test_pwd() {
    let control = logged_in()
        .write(b"PWD\r\n")
        .read(b"257 \"/home/ftp\" is current directory\r\n")
        .build();
    let mut client = login(control, MockConnector::default()).await;

    assert_eq!(client.pwd().await.unwrap(), "/home/ftp");
}

#[tokio::test]
async fn test_pwd_malformed_reply() {
    let control = logged_in()
        .write(b"PWD\r\n")
        .read(b"257 /home/ftp\r\n")
        .build();
    let mut client = login(control, MockConnector::default()).await;

    let err = client.pwd().await.unwrap_err();
    assert!(matches!(err, Error::BadReplyMessage { context: "PWD", .. }));
    assert_eq!(err.category(), ErrorCategory::Parse);
}

#[tokio::test]
async fn test_password_refused_stops_login() {
    // Nothing may be written after PASS: the mock has no further actions.
    let control = Builder::new()
        .read(b"220 Ready\r\n")
        .write(b"USER alice\r\n")
        .read(b"331 Password required\r\n")
        .write(b"PASS wrong\r\n")
        .read(b"530 Login incorrect.\r\n")
        .build();

    let client = Client::from_stream(control, MockConnector::default())
        .await
        .unwrap();
    let err = client.login("alice", "wrong").await.unwrap_err();

    match err {
        Error::LoginFailed { code, message } => {
            assert_eq!(code, 530);
            assert_eq!(message, "Login incorrect.");
        }
        other => panic!("expected LoginFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cwd_and_type() {
    let control = logged_in()
        .write(b"CWD /pub\r\n")
        .read(b"250 Directory changed\r\n")
        .write(b"TYPE I\r\n")
        .read(b"200 Type set to I\r\n")
        .write(b"NOOP\r\n")
        .read(b"200 NOOP ok\r\n")
        .write(b"QUIT\r\n")
        .read(b"221 Goodbye\r\n")
        .build();
    let mut client = login(control, MockConnector::default()).await;

    client.cwd("/pub").await.unwrap();
    client.set_transfer_type(TransferType::Image).await.unwrap();
    client.noop().await.unwrap();
    client.quit().await.unwrap();
}

#[tokio::test]
async fn test_cwd_refused_desynchronizes() {
    let control = logged_in()
        .write(b"CWD /missing\r\n")
        .read(b"550 No such directory\r\n")
        .build();
    let mut client = login(control, MockConnector::default()).await;

    let err = client.cwd("/missing").await.unwrap_err();
    assert!(matches!(err, Error::CwdFailed { code: 550, .. }));
    assert!(err.is_permanent());
    assert!(client.is_desynchronized());

    // Refused without touching the control channel.
    let err = client.pwd().await.unwrap_err();
    assert!(matches!(err, Error::InvalidState(_)));
}

#[tokio::test]
async fn test_list() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"LIST\r\n")
        .read(b"150 Here comes the directory listing\r\n")
        .read(b"226 Directory send OK\r\n")
        .build();
    let data = Builder::new()
        .read(b"drwxr-xr-x    2 ftp      ftp          4096 Mar 14 09:26 pub\r\n")
        .read(b"-rw-r--r--    1 ftp      ftp           120 Jan 01  2020 READ")
        .read(b"ME\r\nlrwxrwxrwx    1 ftp      ftp             3 Jan 01  2020 latest -> pub/v2\r\n")
        .build();
    let connector = MockConnector::with_streams([data]);
    let mut client = login(control, connector.clone()).await;

    let entries = client.list().await.unwrap();

    assert_eq!(connector.addresses(), vec!["127.0.0.1:1025".parse::<SocketAddr>().unwrap()]);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].file_type, FileType::Directory);
    assert_eq!(entries[0].name, "pub");
    assert_eq!(entries[1].name, "README");
    assert_eq!(entries[1].size, 120);
    assert_eq!(entries[2].file_type, FileType::Symlink);
    assert_eq!(entries[2].link_target.as_deref(), Some("pub/v2"));
    assert!(!client.is_desynchronized());
}

#[tokio::test]
async fn test_list_path() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"LIST /pub\r\n")
        .read(b"150 Listing\r\n")
        .read(b"226 Done\r\n")
        .build();
    let data = Builder::new().build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    assert!(client.list_path("/pub").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_malformed() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .build();
    // The listing fails on the first read, before LIST is written.
    let data = Builder::new().read(b"total 42\r\n").build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    assert!(matches!(client.list().await, Err(Error::BadListing)));
    assert!(client.is_desynchronized());
}

#[tokio::test]
async fn test_download() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"RETR notes.txt\r\n")
        .read(b"150 Opening BINARY mode data connection\r\n")
        .read(b"226 Transfer complete\r\n")
        .build();
    let data = Builder::new().read(b"hello ").read(b"world").build();
    let mut client = login(control, MockConnector::with_streams([data]))
        .await
        .with_buffer_size(4);

    let mut sink = Vec::new();
    let bytes = client.download(&mut sink, "notes.txt").await.unwrap();

    assert_eq!(bytes, 11);
    assert_eq!(sink, b"hello world");
}

#[tokio::test]
async fn test_download_completion_without_preliminary() {
    // A 2xx reply to RETR is already final; no further reply is read.
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"RETR empty\r\n")
        .read(b"226 Nothing to send\r\n")
        .write(b"NOOP\r\n")
        .read(b"200 ok\r\n")
        .build();
    let data = Builder::new().build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    let mut sink = Vec::new();
    assert_eq!(client.download(&mut sink, "empty").await.unwrap(), 0);
    client.noop().await.unwrap();
}

#[tokio::test]
async fn test_download_refused() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"RETR secret\r\n")
        .read(b"550 Permission denied\r\n")
        .build();
    let data = Builder::new().build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    let mut sink = Vec::new();
    let err = client.download(&mut sink, "secret").await.unwrap_err();
    assert!(matches!(err, Error::NegativeReply { code: 550, .. }));
    assert_eq!(err.category(), ErrorCategory::Protocol);
}

#[tokio::test]
async fn test_download_transfer_aborted() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"RETR big.iso\r\n")
        .read(b"150 Opening\r\n")
        .read(b"426 Connection closed; transfer aborted\r\n")
        .build();
    let data = Builder::new().read(b"partial").build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    let mut sink = Vec::new();
    let err = client.download(&mut sink, "big.iso").await.unwrap_err();
    assert!(err.is_transient());
    assert_eq!(sink, b"partial");
}

#[tokio::test]
async fn test_upload() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"STOR upload.bin\r\n")
        .read(b"150 Ok to send data\r\n")
        .read(b"226 Transfer complete\r\n")
        .build();
    let data = Builder::new().write(b"payload").build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    let mut source: &[u8] = b"payload";
    let bytes = client.upload(&mut source, "upload.bin").await.unwrap();
    assert_eq!(bytes, 7);
}

#[tokio::test]
async fn test_upload_from_missing_path() {
    let control = logged_in().build();
    let mut client = login(control, MockConnector::default()).await;

    let err = client
        .upload_from_path("/nonexistent/ftpkit/input.bin", "input.bin")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::OpenFile { .. }));
    assert_eq!(err.category(), ErrorCategory::LocalIo);
    assert!(!client.is_desynchronized());
}

#[tokio::test]
async fn test_download_to_path() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(PASV_REPLY)
        .write(b"RETR remote.txt\r\n")
        .read(b"150 Opening\r\n")
        .read(b"226 Done\r\n")
        .build();
    let data = Builder::new().read(b"file contents").build();
    let mut client = login(control, MockConnector::with_streams([data])).await;

    let local = std::env::temp_dir().join(format!("ftpkit-download-{}", std::process::id()));
    let bytes = client.download_to_path(&local, "remote.txt").await.unwrap();

    assert_eq!(bytes, 13);
    assert_eq!(std::fs::read(&local).unwrap(), b"file contents");
    std::fs::remove_file(&local).unwrap();
}

#[tokio::test]
async fn test_bad_pasv_reply() {
    let control = logged_in()
        .write(b"PASV\r\n")
        .read(b"227 Entering Passive Mode (127,0,0,1,4)\r\n")
        .build();
    let mut client = login(control, MockConnector::default()).await;

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, Error::InvalidHostPort(_)));
}

#[tokio::test]
async fn test_data_connection_failure() {
    let control = logged_in().write(b"PASV\r\n").read(PASV_REPLY).build();
    let mut client = login(control, MockConnector::default()).await;

    let mut sink = Vec::new();
    let err = client.download(&mut sink, "file").await.unwrap_err();
    assert!(matches!(err, Error::Closed));
    assert!(client.is_desynchronized());
}

#[tokio::test]
async fn test_control_closed_mid_reply() {
    let control = logged_in()
        .write(b"PWD\r\n")
        .read(b"257-first line\r\n")
        .build();
    let mut client = login(control, MockConnector::default()).await;

    assert!(matches!(client.pwd().await, Err(Error::Closed)));
}
