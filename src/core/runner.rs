use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::command::ToolCommand;
use crate::error::DispatchError;
use crate::models::ExecutionResult;

/// 외부 도구 실행 트레이트.
/// 실제 프로세스 실행과 테스트용 가짜 실행을 이 트레이트로 추상화한다.
pub trait CommandRunner {
    /// 명령을 끝까지 실행하고 종료 코드와 출력을 돌려준다.
    /// 0이 아닌 종료 코드는 에러가 아니다.
    fn run(&self, command: &ToolCommand) -> Result<ExecutionResult, DispatchError>;
}

/// 자식 프로세스를 띄워 동기적으로 실행한다.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> Result<ExecutionResult, DispatchError> {
        debug!(program = %command.program, args = ?command.args, "spawning");

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DispatchError::from_spawn(&command.program, e))?;

        let result = ExecutionResult {
            exit_code: output.status.code().unwrap_or(-1),
            // 깨진 바이트는 U+FFFD로 치환
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            program = %command.program,
            exit_code = result.exit_code,
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "process exited"
        );
        Ok(result)
    }
}
