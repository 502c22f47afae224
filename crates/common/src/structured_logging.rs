use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Структурированная запись лога в JSON формате
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredLogEntry {
    /// Временная метка в ISO 8601 формате
    pub timestamp: String,
    /// Уровень логирования
    pub level: String,
    /// Целевой модуль/компонент
    pub target: String,
    /// Основное сообщение
    pub message: String,
    /// Дополнительные поля события (subject, action, error, ...)
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
    /// Контекст выполнения
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ExecutionContext>,
    /// Метрики операции (латентность backend, размер ответа)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<OperationMetrics>,
}

/// Контекст выполнения: один процесс клиента = одна session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Случайный id, общий для всех записей этого процесса
    pub session_id: String,
    /// Версия приложения
    pub app_version: String,
    /// Имя хоста
    pub hostname: String,
    /// ID процесса
    pub pid: u32,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        static SESSION_ID: OnceLock<String> = OnceLock::new();

        Self {
            session_id: SESSION_ID
                .get_or_init(|| uuid::Uuid::new_v4().to_string())
                .clone(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            hostname: hostname::get()
                .map(|h| h.to_string_lossy().to_string())
                .unwrap_or_else(|_| "unknown".to_string()),
            pid: std::process::id(),
        }
    }
}

/// Метрики, извлекаемые из well-known полей события
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationMetrics {
    /// Длительность операции в миллисекундах (`duration_ms`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// HTTP status ответа backend (`status`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u64>,
    /// Количество обработанных элементов (`count`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_processed: Option<u64>,
}

impl OperationMetrics {
    fn is_empty(&self) -> bool {
        self.duration_ms.is_none() && self.http_status.is_none() && self.items_processed.is_none()
    }
}

/// Layer, пишущий каждое событие одной JSON строкой.
///
/// По умолчанию пишет в stderr: stdout CLI занят выводом команд.
pub struct JsonFormatter<W = fn() -> std::io::Stderr> {
    make_writer: W,
    include_context: bool,
}

impl JsonFormatter {
    pub fn stderr() -> Self {
        Self {
            make_writer: std::io::stderr,
            include_context: true,
        }
    }
}

impl<W> JsonFormatter<W>
where
    W: for<'w> MakeWriter<'w> + 'static,
{
    pub fn with_writer(make_writer: W) -> Self {
        Self {
            make_writer,
            include_context: true,
        }
    }

    pub fn with_context(mut self, include_context: bool) -> Self {
        self.include_context = include_context;
        self
    }

    fn build_entry(&self, event: &Event<'_>) -> StructuredLogEntry {
        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let metrics = visitor.extract_metrics();

        StructuredLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            level: level_name(*event.metadata().level()).to_string(),
            target: event.metadata().target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
            context: self.include_context.then(ExecutionContext::default),
            metrics,
        }
    }
}

impl<S, W> Layer<S> for JsonFormatter<W>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let entry = self.build_entry(event);

        if let Ok(json) = serde_json::to_string(&entry) {
            let mut writer = self.make_writer.make_writer();
            let _ = writeln!(writer, "{json}");
        }
    }
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Визитор для извлечения полей из события
#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: BTreeMap<String, Value>,
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(format!("{value:?}")));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), Value::Number(value.into()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), Value::Number(value.into()));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.fields.insert(field.name().to_string(), Value::Number(n));
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), Value::Bool(value));
    }
}

impl JsonVisitor {
    fn extract_metrics(&self) -> Option<OperationMetrics> {
        let metrics = OperationMetrics {
            duration_ms: self.u64_field("duration_ms"),
            http_status: self.u64_field("status"),
            items_processed: self.u64_field("count"),
        };

        (!metrics.is_empty()).then_some(metrics)
    }

    fn u64_field(&self, name: &str) -> Option<u64> {
        self.fields.get(name).and_then(Value::as_u64)
    }
}

/// Конфигурация для structured logging
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Минимальный уровень логирования (перекрывается `RUST_LOG`)
    pub level: Level,
    /// Вывод в JSON формате
    pub json_output: bool,
    /// Включить цветной вывод (только для non-JSON)
    pub color_output: bool,
    /// Включить контекст выполнения в JSON записи
    pub include_context: bool,
    /// Включить номера строк
    pub include_line_numbers: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json_output: false,
            color_output: true,
            include_context: true,
            include_line_numbers: cfg!(debug_assertions),
        }
    }
}

impl LoggingConfig {
    /// Build from textual settings; unknown levels fall back to `info`
    pub fn from_settings(level: &str, json_output: bool) -> Self {
        Self {
            level: Level::from_str(level.trim()).unwrap_or(Level::INFO),
            json_output,
            ..Self::default()
        }
    }
}

/// Инициализировать structured logging (один раз на процесс)
pub fn init_structured_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    if config.json_output {
        // JSON формат для production
        let json_layer = JsonFormatter::stderr().with_context(config.include_context);

        let subscriber = Registry::default().with(env_filter).with(json_layer);

        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        // Человекочитаемый формат для разработки
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(config.include_line_numbers)
            .with_ansi(config.color_output)
            .with_span_events(FmtSpan::CLOSE);

        let subscriber = Registry::default().with(env_filter).with(fmt_layer);

        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

/// Вспомогательная структура для измерения времени операций
pub struct OperationTimer {
    start: Instant,
    operation_name: String,
    fields: BTreeMap<String, Value>,
}

impl OperationTimer {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation_name: operation_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: impl Serialize) {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> OperationMetrics {
        let duration_ms = self.duration_ms();

        tracing::info!(
            operation = %self.operation_name,
            duration_ms,
            success = true,
            fields = ?self.fields,
            "Operation completed"
        );

        OperationMetrics {
            duration_ms: Some(duration_ms),
            ..OperationMetrics::default()
        }
    }

    pub fn finish_with_result<T, E: std::fmt::Display>(self, result: &Result<T, E>) -> OperationMetrics {
        let duration_ms = self.duration_ms();

        match result {
            Ok(_) => {
                tracing::info!(
                    operation = %self.operation_name,
                    duration_ms,
                    success = true,
                    fields = ?self.fields,
                    "Operation completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation = %self.operation_name,
                    duration_ms,
                    success = false,
                    error = %e,
                    fields = ?self.fields,
                    "Operation failed"
                );
            }
        }

        OperationMetrics {
            duration_ms: Some(duration_ms),
            ..OperationMetrics::default()
        }
    }

    fn duration_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
