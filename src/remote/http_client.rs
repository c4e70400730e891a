use futures::StreamExt;
use tokio::io::AsyncReadExt;

use super::*;

const UPLOAD_CHUNK: usize = 64 * 1024;

fn transport(path: &str, err: reqwest::Error) -> GatewayError {
    GatewayError::Transport {
        path: path.to_string(),
        message: err.to_string(),
    }
}

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::Response,
        path: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(GatewayError::Forbidden {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(resp)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_root(), path)
    }

    fn request(&self, verb: Verb, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        let builder = match verb {
            Verb::Get => self.client.get(url),
            Verb::Post => self.client.post(url),
            Verb::Put => self.client.put(url),
            Verb::Delete => self.client.delete(url),
        };
        match &self.config.token {
            Some(token) => builder.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token),
            ),
            None => builder,
        }
    }
}

impl Gateway for RemoteClient {
    async fn send(&self, verb: Verb, path: &str, body: Option<Value>) -> Result<Value, GatewayError> {
        tracing::debug!(verb = verb.as_str(), path, "request");
        let mut req = self.request(verb, path);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await.map_err(|e| transport(path, e))?;
        let resp = self.ensure_ok(resp, path)?;
        let bytes = resp.bytes().await.map_err(|e| transport(path, e))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    async fn fetch_text(&self, path: &str) -> Result<String, GatewayError> {
        tracing::debug!(path, "text request");
        let resp = self
            .request(Verb::Get, path)
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        let resp = self.ensure_ok(resp, path)?;
        resp.text().await.map_err(|e| transport(path, e))
    }

    async fn upload(
        &self,
        path: &str,
        file: &UploadFile,
        progress: &mut dyn FnMut(TransferProgress),
    ) -> Result<Value, GatewayError> {
        let handle = tokio::fs::File::open(&file.path)
            .await
            .map_err(|e| GatewayError::Io {
                path: file.path.display().to_string(),
                message: e.to_string(),
            })?;

        // The body stream runs inside reqwest; it reports chunk sizes back
        // over a channel so the callback stays on this task.
        let (sent_tx, mut sent_rx) = tokio::sync::mpsc::unbounded_channel::<u64>();
        let chunks = futures::stream::try_unfold((handle, sent_tx), |(mut handle, sent_tx)| async move {
            let mut buf = vec![0u8; UPLOAD_CHUNK];
            let n = handle.read(&mut buf).await?;
            if n == 0 {
                return Ok::<_, std::io::Error>(None);
            }
            buf.truncate(n);
            let _ = sent_tx.send(n as u64);
            Ok(Some((buf, (handle, sent_tx))))
        })
        .boxed();

        let part = reqwest::multipart::Part::stream_with_length(
            reqwest::Body::wrap_stream(chunks),
            file.size,
        )
        .file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        tracing::info!(path, file = %file.name, size = file.size, "upload started");
        let send = self.request(Verb::Post, path).multipart(form).send();
        tokio::pin!(send);

        let total = file.size;
        let mut sent = 0u64;
        let resp = loop {
            tokio::select! {
                biased;
                Some(n) = sent_rx.recv() => {
                    sent = (sent + n).min(total);
                    progress(TransferProgress { sent, total });
                }
                resp = &mut send => break resp,
            }
        };
        while let Ok(n) = sent_rx.try_recv() {
            sent = (sent + n).min(total);
            progress(TransferProgress { sent, total });
        }

        let resp = resp.map_err(|e| transport(path, e))?;
        let resp = self.ensure_ok(resp, path)?;
        resp.json().await.map_err(|e| GatewayError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    fn download_url(&self, key: &PendingDownloadKey) -> String {
        self.url(&format!("/download/{}/{}", key.guid, key.token))
    }
}
