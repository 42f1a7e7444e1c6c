use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8080")]
    pub server_addr: String,

    // --- Chat LLM Provider Args ---
    /// Base URL for the chat-completions API.
    #[arg(long, env = "CHAT_BASE_URL", default_value = "https://api.openai.com/v1/chat/completions")]
    pub chat_base_url: String,

    /// API key for the LLM provider.
    #[arg(long, env = "OPENAI_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Model name used for both chat and scanner completions.
    #[arg(long, env = "CHAT_MODEL", default_value = "gpt-4o")]
    pub chat_model: String,

    /// Maximum completion tokens for a single chat turn.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value = "2000")]
    pub chat_max_tokens: u32,

    /// Overall deadline for one relayed chat turn, in seconds.
    #[arg(long, env = "CHAT_TIMEOUT_SECS", default_value = "60")]
    pub chat_timeout_secs: u64,

    /// Maximum completion tokens for one scanner run.
    #[arg(long, env = "SCAN_MAX_TOKENS", default_value = "4000")]
    pub scan_max_tokens: u32,

    /// Overall deadline for one scanner completion, in seconds.
    #[arg(long, env = "SCAN_TIMEOUT_SECS", default_value = "300")]
    pub scan_timeout_secs: u64,

    // --- Scheduled Trigger Args ---
    /// Shared secret gating the scheduled /scan trigger. When empty the
    /// scheduled path is disabled and authorization always fails.
    #[arg(long, env = "CRON_SECRET", default_value = "")]
    pub cron_secret: String,

    // --- Scan Store Args ---
    /// Scan result store type (memory, supabase)
    #[arg(long, env = "STORE_TYPE", default_value = "memory")]
    pub store_type: String,

    /// Supabase project URL (e.g. https://xyz.supabase.co)
    #[arg(long, env = "SUPABASE_URL", default_value = "")]
    pub store_url: String,

    /// Supabase service role key used for server-side inserts.
    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", default_value = "")]
    pub store_service_key: String,

    /// Table that scanner results are appended to.
    #[arg(long, env = "STORE_TABLE", default_value = "scanner_results")]
    pub store_table: String,
}
