#![allow(dead_code)]

/// Test utilities for building access-log lines
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Builder for rendering one access-log line from its fields
#[derive(Debug, Clone)]
pub struct LogLineBuilder {
    host: String,
    remote_addr: String,
    identity: String,
    user: String,
    time: String,
    method: String,
    path: String,
    proto: String,
    status: String,
    bytes: String,
    referer: String,
    user_agent: String,
}

impl LogLineBuilder {
    /// A well-formed line with typical values
    pub fn new() -> Self {
        Self {
            host: "www.example.com".to_string(),
            remote_addr: "10.0.0.1".to_string(),
            identity: "-".to_string(),
            user: "-".to_string(),
            time: "10/Oct/2023:13:55:36 -0700".to_string(),
            method: "GET".to_string(),
            path: "/index.html".to_string(),
            proto: "HTTP/1.1".to_string(),
            status: "200".to_string(),
            bytes: "1024".to_string(),
            referer: "-".to_string(),
            user_agent: "curl/8.0".to_string(),
        }
    }

    pub fn host(mut self, v: &str) -> Self {
        self.host = v.to_string();
        self
    }

    pub fn remote_addr(mut self, v: &str) -> Self {
        self.remote_addr = v.to_string();
        self
    }

    pub fn identity(mut self, v: &str) -> Self {
        self.identity = v.to_string();
        self
    }

    pub fn user(mut self, v: &str) -> Self {
        self.user = v.to_string();
        self
    }

    pub fn time(mut self, v: &str) -> Self {
        self.time = v.to_string();
        self
    }

    pub fn method(mut self, v: &str) -> Self {
        self.method = v.to_string();
        self
    }

    pub fn path(mut self, v: &str) -> Self {
        self.path = v.to_string();
        self
    }

    pub fn proto(mut self, v: &str) -> Self {
        self.proto = v.to_string();
        self
    }

    pub fn status(mut self, v: &str) -> Self {
        self.status = v.to_string();
        self
    }

    pub fn bytes(mut self, v: &str) -> Self {
        self.bytes = v.to_string();
        self
    }

    pub fn referer(mut self, v: &str) -> Self {
        self.referer = v.to_string();
        self
    }

    pub fn user_agent(mut self, v: &str) -> Self {
        self.user_agent = v.to_string();
        self
    }

    /// Render the line in access-log layout (no trailing newline)
    pub fn build(&self) -> String {
        format!(
            r#"{} {} {} {} [{}] "{} {} {}" {} {} "{}" "{}""#,
            self.host,
            self.remote_addr,
            self.identity,
            self.user,
            self.time,
            self.method,
            self.path,
            self.proto,
            self.status,
            self.bytes,
            self.referer,
            self.user_agent,
        )
    }
}

/// Write lines to a file, newline-terminated
pub fn write_log(path: &Path, lines: &[String]) {
    let mut file = File::create(path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
}

/// `n` distinct, well-formed lines; line `i` has status `200 + i % 5`,
/// `i * 10` bytes and path `/page/{i}`
pub fn numbered_lines(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            LogLineBuilder::new()
                .remote_addr(&format!("10.0.0.{}", i % 250))
                .time(&format!("10/Oct/2023:13:{:02}:{:02} +0000", (i / 60) % 60, i % 60))
                .path(&format!("/page/{}", i))
                .status(&(200 + (i % 5)).to_string())
                .bytes(&(i * 10).to_string())
                .build()
        })
        .collect()
}
