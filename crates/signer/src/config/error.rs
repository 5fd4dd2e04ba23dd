use flex_error::{define_error, TraceError};

define_error! {
    Error {
        Io
            [ TraceError<std::io::Error> ]
            |_| { "config I/O error" },

        Decode
            [ TraceError<toml::de::Error> ]
            |_| { "invalid configuration" },

        Encode
            [ TraceError<toml::ser::Error> ]
            |_| { "invalid configuration" },

        InvalidGasPrice
            { price: String }
            |e| { format!("invalid gas price: {}", e.price) },

        EmptyChainId
            |_| { "the chain identifier is empty" },

        MemoTooLong
            { length: usize }
            |e| {
                format_args!("memo of {} characters exceeds the {} character bound",
                    e.length, crate::config::types::Memo::MAX_LEN)
            },
    }
}
