use super::{mock_link, test_client};
use crate::fetchers::{DirectorySink, Progress, fetch_all};
use crate::results::{ItemState, PdfLink};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(test)]
mod tests {
    use super::*;

    async fn serve(server: &MockServer, at: &str, status: u16, body: &'static [u8]) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_duplicate_names_never_overwrite() {
        let server = MockServer::start().await;
        serve(&server, "/one/a.pdf", 200, b"first").await;
        serve(&server, "/two/a.pdf", 200, b"second").await;

        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path()).await.unwrap();
        let links = vec![
            mock_link(&server, "/one/a.pdf", "a.pdf"),
            mock_link(&server, "/two/a.pdf", "a.pdf"),
        ];

        let report = fetch_all(&test_client(), &links, &mut sink, |_| {}).await;

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(std::fs::read(dir.path().join("a.pdf")).unwrap(), b"first");
        assert_eq!(std::fs::read(dir.path().join("a_1.pdf")).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_existing_file_is_kept() {
        let server = MockServer::start().await;
        serve(&server, "/r.pdf", 200, b"new").await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("r.pdf"), b"old").unwrap();
        std::fs::write(dir.path().join("r_1.pdf"), b"older").unwrap();

        let mut sink = DirectorySink::create(dir.path()).await.unwrap();
        let links = vec![mock_link(&server, "/r.pdf", "r.pdf")];
        let report = fetch_all(&test_client(), &links, &mut sink, |_| {}).await;

        assert_eq!(report.succeeded, 1);
        assert_eq!(std::fs::read(dir.path().join("r.pdf")).unwrap(), b"old");
        assert_eq!(std::fs::read(dir.path().join("r_1.pdf")).unwrap(), b"older");
        assert_eq!(std::fs::read(dir.path().join("r_2.pdf")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_failures_are_counted_and_do_not_abort() {
        let server = MockServer::start().await;
        serve(&server, "/ok1.pdf", 200, b"1").await;
        serve(&server, "/missing.pdf", 404, b"").await;
        serve(&server, "/ok2.pdf", 200, b"22").await;
        Mock::given(method("GET"))
            .and(path("/slow.pdf"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path().join("nested/out")).await.unwrap();
        let links = vec![
            mock_link(&server, "/ok1.pdf", "ok1.pdf"),
            mock_link(&server, "/missing.pdf", "missing.pdf"),
            mock_link(&server, "/slow.pdf", "slow.pdf"),
            mock_link(&server, "/ok2.pdf", "ok2.pdf"),
        ];

        let mut seen = Vec::new();
        let report = fetch_all(&test_client(), &links, &mut sink, |p: &Progress<'_>| {
            seen.push((p.index, p.total, p.link.filename.clone()))
        })
        .await;

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 2);
        assert_eq!(report.total(), 4);
        assert!(matches!(report.items[1].state, ItemState::Failed { .. }));
        assert!(matches!(report.items[2].state, ItemState::Failed { .. }));
        assert!(matches!(
            report.items[3].state,
            ItemState::Written { bytes: 2, .. }
        ));

        let out = dir.path().join("nested/out");
        assert!(out.join("ok1.pdf").exists());
        assert!(out.join("ok2.pdf").exists());
        assert!(!out.join("missing.pdf").exists());
        assert!(!out.join("slow.pdf").exists());

        let indices: Vec<(usize, usize)> = seen.iter().map(|(i, t, _)| (*i, *t)).collect();
        assert_eq!(indices, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        assert_eq!(seen[2].2, "slow.pdf");
    }

    #[tokio::test]
    async fn test_unsafe_filename_is_sanitized() {
        let server = MockServer::start().await;
        serve(&server, "/evil.pdf", 200, b"x").await;

        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path()).await.unwrap();
        let links = vec![mock_link(&server, "/evil.pdf", "..\\evil.pdf")];
        let report = fetch_all(&test_client(), &links, &mut sink, |_| {}).await;

        assert_eq!(report.succeeded, 1);
        assert!(dir.path().join(".._evil.pdf").exists());
    }

    /// Serves one response that promises 1000 bytes, sends a few, then hangs up
    async fn truncated_body_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }

            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: application/pdf\r\n\
                      Content-Length: 1000\r\n\r\n\
                      %PDF-1.4 partial",
                )
                .await
                .unwrap();
            socket.flush().await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/cut.pdf", addr)
    }

    #[tokio::test]
    async fn test_interrupted_body_leaves_no_file() {
        let url = truncated_body_server().await;

        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::create(dir.path()).await.unwrap();
        let links = vec![PdfLink {
            filename: "cut.pdf".to_string(),
            url,
            display_text: "cut.pdf".to_string(),
        }];

        let report = fetch_all(&test_client(), &links, &mut sink, |_| {}).await;

        assert_eq!(report.succeeded, 0);
        assert_eq!(report.failed, 1);
        assert!(matches!(report.items[0].state, ItemState::Failed { .. }));
        assert!(!dir.path().join("cut.pdf").exists());
        assert_eq!(std::fs::read_dir(sink.dir()).unwrap().count(), 0);
    }
}
