// Loopback HTTP server answering every connection with one canned response.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub enum Reply {
    Status { code: u16, body: Vec<u8> },
    /// Accept the connection and never answer.
    Hang,
}

impl Reply {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Reply::Status {
            code: 200,
            body: body.into(),
        }
    }

    pub fn status(code: u16) -> Self {
        Reply::Status {
            code,
            body: Vec::new(),
        }
    }
}

/// Serve `reply` on an ephemeral port; returns `http://127.0.0.1:<port>`.
pub async fn serve(reply: Reply) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let reply = std::sync::Arc::new(reply);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let reply = reply.clone();
            tokio::spawn(async move {
                read_request_head(&mut socket).await;
                match reply.as_ref() {
                    Reply::Hang => tokio::time::sleep(Duration::from_secs(30)).await,
                    Reply::Status { code, body } => {
                        let head = if *code == 204 {
                            "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
                        } else {
                            format!(
                                "HTTP/1.1 {} Canned\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                                code,
                                body.len()
                            )
                        };
                        let _ = socket.write_all(head.as_bytes()).await;
                        if *code != 204 {
                            let _ = socket.write_all(body).await;
                        }
                        let _ = socket.shutdown().await;
                    }
                }
            });
        }
    });

    base
}

async fn read_request_head(socket: &mut tokio::net::TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}
