use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexBenchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("取得エラー: {0}")]
    Fetch(String),

    #[error("HTTPエラー {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("解析エラー: {0}")]
    Parse(String),

    #[error("判定データのソースが設定されていません。`lexbench config --add-source KIND=LOCATION` で追加してください")]
    NoSources,

    #[error("訳語候補ファイルが指定されていません。引数または `lexbench config --set-candidates PATH` で指定してください")]
    MissingCandidates,

    #[error("候補ファイルが見つかりません: {0}")]
    NoCandidateFiles(String),

    #[error("出力エラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] lexbench_common::Error),
}

pub type Result<T> = std::result::Result<T, LexBenchError>;
