use std::convert::Infallible;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tower_async::Service;
use tower_async_http::services::fs::ServeFileSystemResponseBody;
use tower_async_http::services::ServeDir;

use crate::log;
use crate::report::{Error, ErrorExt, Report};
use crate::Serve;

pub fn serve(s: &Serve) -> Report<()> {
    if !s.dist.is_dir() {
        return Err(Error::message(format!(
            "couldn't find the demo build at {}",
            s.dist.display(),
        )));
    }

    Builder::new_current_thread()
        .enable_all()
        .build()
        .message("failed to create tokio runtime")?
        .block_on(start(s.dist.clone(), s.port))
}

fn serve_dir(dist: PathBuf) -> ServeDir {
    ServeDir::new(dist).append_index_html_on_directories(true)
}

async fn start(dist: PathBuf, port: u16) -> Report<()> {
    let ip = Ipv4Addr::LOCALHOST;

    let listener = TcpListener::bind((ip, port))
        .await
        .with_message(|| format!("failed to bind tcp listener to {ip}:{port}"))?;

    log::starting!("development server at http://{ip}:{port}");

    let dir = serve_dir(dist);

    loop {
        let (tcp, addr) = listener
            .accept()
            .await
            .message("failed to accept tcp connection")?;

        log::info!("connection from {addr}");

        let dir = dir.clone();

        tokio::spawn(async move {
            let io = TokioIo::new(tcp);
            let service = service_fn(move |req| respond(dir.clone(), req));

            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(io, service)
                .await
            {
                log::error!("serving connection: {err}");
            }
        });
    }
}

async fn respond<B>(
    dir: ServeDir,
    req: Request<B>,
) -> Result<Response<ServeFileSystemResponseBody>, Infallible>
where
    B: Send + 'static,
{
    let uri = req.uri().clone();
    let res = dir.call(req).await?;

    match res.status() {
        status if status.is_success() => log::serving!("{uri}"),
        status => log::info!("{status} {uri}"),
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use http_body_util::{BodyExt, Empty};
    use hyper::body::Bytes;
    use hyper::header::{CONTENT_TYPE, LOCATION};
    use hyper::StatusCode;

    use super::*;

    fn dist() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let dist = root.path().join("dist");

        fs::create_dir_all(dist.join("snippets")).unwrap();
        fs::write(dist.join("index.html"), "<!DOCTYPE html>").unwrap();
        fs::write(dist.join("textlens_app_bg.wasm"), b"\0asm").unwrap();
        fs::write(dist.join("snippets/index.html"), "snippets").unwrap();
        fs::write(root.path().join("secret.txt"), "secret").unwrap();

        root
    }

    fn get(root: &tempfile::TempDir, uri: &str) -> (Response<()>, Bytes) {
        let dir = serve_dir(root.path().join("dist"));
        let req = Request::get(uri).body(Empty::<Bytes>::new()).unwrap();

        Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let res = respond(dir, req).await.unwrap();
                let (parts, body) = res.into_parts();
                let body = body.collect().await.unwrap().to_bytes();

                (Response::from_parts(parts, ()), body)
            })
    }

    #[test]
    fn serves_index() {
        let root = dist();
        let (res, body) = get(&root, "/");

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(body, "<!DOCTYPE html>");
    }

    #[test]
    fn serves_wasm() {
        let root = dist();
        let (res, body) = get(&root, "/textlens_app_bg.wasm");

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_TYPE], "application/wasm");
        assert_eq!(body, &b"\0asm"[..]);
    }

    #[test]
    fn directory_without_slash_redirects() {
        let root = dist();
        let (res, _) = get(&root, "/snippets");

        assert!(res.status().is_redirection());
        assert_eq!(res.headers()[LOCATION], "/snippets/");

        let (res, body) = get(&root, "/snippets/");

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body, "snippets");
    }

    #[test]
    fn missing_file_is_not_found() {
        let root = dist();
        let (res, _) = get(&root, "/nope.js");

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn refuses_to_escape_dist() {
        let root = dist();

        for uri in ["/../secret.txt", "/snippets/../../secret.txt", "/%2e%2e/secret.txt"] {
            let (res, body) = get(&root, uri);

            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_ne!(body, "secret", "{uri}");
        }
    }
}
