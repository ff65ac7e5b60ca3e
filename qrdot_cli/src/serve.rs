use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use tiny_http::{Header, Method, Request, Response, Server};

use qrdot_core::RenderOptions;
use qrdot_render::ImageKind;

const GENERATE_PATH: &str = "/qrcode/generate";

pub struct ServeConfig {
    pub bind: String,
    pub workers: usize,
    /// Largest accepted canvas side, in pixels.
    pub max_canvas: u32,
}

/// Serve images until the listener fails. Every worker thread pulls requests from the same listener and renders
/// independently of the others.
pub fn serve(config: ServeConfig) -> Result<()> {
    let server = Server::http(&config.bind).map_err(|err| anyhow!("cannot listen on {}: {}", config.bind, err))?;
    let server = Arc::new(server);
    log::info!(
        "listening on http://{}{} with {} workers",
        config.bind,
        GENERATE_PATH,
        config.workers
    );
    let workers = (0..config.workers)
        .map(|id| {
            let server = Arc::clone(&server);
            let max_canvas = config.max_canvas;
            thread::Builder::new()
                .name(format!("qrdot-worker-{}", id))
                .spawn(move || work(&server, max_canvas))
        })
        .collect::<std::io::Result<Vec<_>>>()?;
    for worker in workers {
        if worker.join().is_err() {
            log::error!("worker thread panicked");
        }
    }
    Ok(())
}

fn work(server: &Server, max_canvas: u32) {
    loop {
        let request = match server.recv() {
            Ok(request) => request,
            Err(err) => {
                log::error!("cannot receive request: {}", err);
                return;
            }
        };
        respond(request, max_canvas);
    }
}

fn respond(request: Request, max_canvas: u32) {
    let reply = handle(request.method(), request.url(), max_canvas);
    log::info!("{} {} -> {}", request.method(), request.url(), reply.status);
    if let Err(err) = request.respond(reply.into_response()) {
        log::warn!("cannot send response: {}", err);
    }
}

/// A response, before it is turned into bytes on the wire.
#[derive(Debug)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
    attachment: Option<String>,
}

impl Reply {
    fn text(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: message.into().into_bytes(),
            attachment: None,
        }
    }

    fn image(kind: ImageKind, body: Vec<u8>) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();
        Self {
            status: 200,
            content_type: kind.mime_type(),
            body,
            attachment: Some(format!("{}.{}", millis, kind.extension())),
        }
    }

    fn into_response(self) -> Response<std::io::Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(self.status);
        let disposition = self
            .attachment
            .map(|name| format!("attachment; filename=\"{}\"", name));
        let headers = [
            Some(("Content-Type", self.content_type.to_owned())),
            Some(("Access-Control-Allow-Origin", "*".to_owned())),
            disposition.map(|value| ("Content-Disposition", value)),
        ];
        for (name, value) in headers.into_iter().flatten() {
            match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => log::warn!("dropping invalid header {}: {}", name, value),
            }
        }
        response
    }
}

fn handle(method: &Method, url: &str, max_canvas: u32) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    if path != GENERATE_PATH {
        return Reply::text(404, "not found");
    }
    if *method != Method::Get {
        return Reply::text(405, "only GET is supported");
    }
    let (text, options) = parse_query(query);
    let Some(text) = text else {
        return Reply::text(400, "missing required parameter 'text'");
    };
    let image = match qrdot_render::generate_within(&text, &options, max_canvas) {
        Ok(image) => image,
        Err(err) => return Reply::text(400, err.to_string()),
    };
    match qrdot_render::encode_image(&image, ImageKind::Png) {
        Ok(bytes) => Reply::image(ImageKind::Png, bytes),
        Err(err) => {
            log::error!("{}", err);
            Reply::text(500, "cannot encode image")
        }
    }
}

/// Parse the query string of a generate request into the text to encode and the rendering options. Unparseable
/// numbers and flags are treated as absent.
fn parse_query(query: &str) -> (Option<String>, RenderOptions) {
    let mut text = None;
    let mut options = RenderOptions::default();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "text" => text = Some(value),
            "width" => options.canvas_width = value.parse().ok(),
            "height" => options.canvas_height = value.parse().ok(),
            "quiet" => options.quiet_zone = value.parse().ok(),
            "foreground" => options.foreground = Some(value),
            "background" => options.background = Some(value),
            "outerConnerColor" => options.outer_color = Some(value),
            "middleConnerColor" => options.middle_color = Some(value),
            "innerConnerColor" => options.inner_color = Some(value),
            "type" => options.shape_style = Some(value),
            "backgroundRound" => options.background_round = parse_flag(&value),
            "ecl" => options.ecl = Some(value),
            "seed" => options.seed = value.parse().ok(),
            other => log::debug!("ignoring unknown parameter '{}'", other),
        }
    }
    (text, options)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}
