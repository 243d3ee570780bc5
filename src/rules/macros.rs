/// Push a formatted [`Finding`](crate::rules::Finding) onto a findings list.
#[macro_export]
macro_rules! emit {
    ($findings:expr, $($msg:tt)+) => {
        $findings.push($crate::rules::Finding {
            message: format!($($msg)+),
        });
    };
}
